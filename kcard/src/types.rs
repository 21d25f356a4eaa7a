// kcard/src/types.rs

/// Card scheme detected by AID trial-selection. Selected once per read
/// session and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardScheme {
    TMoney,
    Ezl,
    Hipass,
    RailPlus,
    Unknown,
}

impl CardScheme {
    /// Vendor display name as printed on the physical cards.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::TMoney => "티머니 (T-money)",
            Self::Ezl => "이즐 (EZL)",
            Self::Hipass => "하이패스 (Hipass)",
            Self::RailPlus => "레일플러스 (Rail+)",
            Self::Unknown => "알 수 없는 카드",
        }
    }
}

/// Kind of a decoded transaction record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TxKind {
    Use,
    Charge,
    Unknown,
}

/// One decoded transaction record.
///
/// `date` is absent for schemes that store no on-card timestamp; `location`
/// is the scheme-supplied label, reproduced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transaction {
    pub kind: TxKind,
    pub date: Option<String>,
    pub location: String,
    pub amount: u32,
    pub balance_after: u32,
}

impl Transaction {
    pub fn new(
        kind: TxKind,
        date: Option<String>,
        location: impl Into<String>,
        amount: u32,
        balance_after: u32,
    ) -> Self {
        Self {
            kind,
            date,
            location: location.into(),
            amount,
            balance_after,
        }
    }
}

/// Result of one successful read session, handed to the persistence and
/// display sinks as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardReadResult {
    pub scheme: CardScheme,
    /// Formatted on-card number, or the uppercase hex of the hardware id
    /// when no on-card number validated.
    pub card_number: String,
    pub balance: u32,
    /// Newest-record-first, as read from the card.
    pub transactions: Vec<Transaction>,
}

/// Hardware card identifier - Newtype Pattern.
///
/// ISO-DEP UIDs vary in length (4, 7 or 10 bytes), so this wraps an owned
/// buffer rather than a fixed array. Used only as the fallback card number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CardId(Vec<u8>);

impl CardId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Uppercase hex rendering used as the fallback card number.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_upper(&self.0)
    }
}

impl From<&[u8]> for CardId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}
