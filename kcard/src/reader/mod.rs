// kcard/src/reader/mod.rs

use std::marker::PhantomData;

use log::{debug, info};

use crate::scheme::{self, Decoder, Detection};
use crate::transport::Transceiver;
use crate::types::{CardId, CardReadResult, CardScheme};
use crate::{Error, Result};

/// Type-state markers
pub struct Idle;
pub struct Connected;
pub struct SchemeDetected;

/// One read session against one physically presented card.
///
/// The type-state enforces the session order at compile time:
/// `Idle -> Connected -> SchemeDetected -> CardReadResult`. Every entity is
/// created fresh per session; nothing survives into the next tap.
pub struct Session<'a, State = Idle> {
    transceiver: &'a mut dyn Transceiver,
    card_id: CardId,
    detection: Option<Detection>,
    _state: PhantomData<State>,
}

impl<'a> Session<'a, Idle> {
    pub fn new(transceiver: &'a mut dyn Transceiver, card_id: CardId) -> Self {
        Self {
            transceiver,
            card_id,
            detection: None,
            _state: PhantomData,
        }
    }

    /// Connect to the card. A transport failure here fails the session.
    pub fn connect(self) -> Result<Session<'a, Connected>> {
        self.transceiver.connect()?;
        debug!("connected to card, hardware id {}", self.card_id.to_hex());
        Ok(Session {
            transceiver: self.transceiver,
            card_id: self.card_id,
            detection: None,
            _state: PhantomData,
        })
    }
}

impl<'a> Session<'a, Connected> {
    /// Run AID trial-selection. A card matching no known AID fails the
    /// session with `NoSchemeMatched`.
    pub fn detect(self) -> Result<Session<'a, SchemeDetected>> {
        let detection = scheme::detect(self.transceiver);
        if detection.scheme == CardScheme::Unknown {
            return Err(Error::NoSchemeMatched);
        }
        info!("detected card scheme: {}", detection.scheme.display_name());
        Ok(Session {
            transceiver: self.transceiver,
            card_id: self.card_id,
            detection: Some(detection),
            _state: PhantomData,
        })
    }
}

impl<'a> Session<'a, SchemeDetected> {
    pub fn scheme(&self) -> CardScheme {
        self.detection
            .as_ref()
            .map(|detection| detection.scheme)
            .unwrap_or(CardScheme::Unknown)
    }

    /// Dispatch the detected scheme's decoder: secondary select, balance,
    /// card number, history, then assemble the result. The sub-steps are
    /// fail-soft to defaults; only transport-level connect/detect failures
    /// end a session.
    pub fn parse(self) -> Result<CardReadResult> {
        let detection = self.detection.ok_or(Error::NoSchemeMatched)?;
        let scheme = detection.scheme;
        let mut decoder =
            Decoder::for_scheme(scheme, detection.fci).ok_or(Error::NoSchemeMatched)?;

        if !decoder.select_secondary(self.transceiver) {
            debug!("secondary selection unavailable, continuing best-effort");
        }
        let balance = decoder.read_balance(self.transceiver);
        let card_number = decoder.read_card_number(self.transceiver, &self.card_id);
        let transactions = decoder.read_history(self.transceiver);
        info!(
            "parsed {}: balance {}, {} transactions",
            scheme.display_name(),
            balance,
            transactions.len()
        );

        Ok(CardReadResult {
            scheme,
            card_number,
            balance,
            transactions,
        })
    }
}

/// Read one card end to end: connect, detect, parse, close. The close is
/// best-effort on both paths; on error no partial result escapes.
pub fn read_card(transceiver: &mut dyn Transceiver, card_id: CardId) -> Result<CardReadResult> {
    let result = Session::new(&mut *transceiver, card_id)
        .connect()
        .and_then(|session| session.detect())
        .and_then(|session| session.parse());
    if let Err(err) = transceiver.close() {
        debug!("close failed: {}", err);
    }
    result
}
