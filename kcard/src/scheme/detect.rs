// kcard/src/scheme/detect.rs

use log::{debug, info, warn};

use crate::constants::{
    AID_EZL_ALT1, AID_EZL_ALT2, AID_EZL_IN_FCI, AID_HIPASS_IN_FCI, AID_KFTC, AID_RAILPLUS,
    AID_TMONEY,
};
use crate::protocol::fields;
use crate::protocol::{split_payload, Apdu, StatusWord};
use crate::transport::Transceiver;
use crate::types::CardScheme;
use crate::utils::{bytes_to_hex_spaced, DEFAULT_EXCHANGE_TIMEOUT_MS};

/// Outcome of AID trial-selection: the detected scheme and the FCI payload
/// of the winning SELECT (status word stripped). The FCI is session-scoped
/// working memory, threaded explicitly to the decoders that need it.
#[derive(Debug, Clone)]
pub struct Detection {
    pub scheme: CardScheme,
    pub fci: Option<Vec<u8>>,
}

/// Try the known AIDs in priority order; the first one the card answers
/// with Success wins. The KFTC root AID is shared by the Hipass and EZL
/// families and is disambiguated through the returned FCI.
pub fn detect(transceiver: &mut dyn Transceiver) -> Detection {
    if let Some(fci) = try_select(transceiver, &AID_TMONEY, "T-money") {
        return Detection {
            scheme: CardScheme::TMoney,
            fci: Some(fci),
        };
    }

    if let Some(fci) = try_select(transceiver, &AID_KFTC, "KFTC") {
        let scheme = if fields::fci_contains_aid(&fci, &AID_HIPASS_IN_FCI) {
            info!("detected as Hipass (nested AID in FCI)");
            CardScheme::Hipass
        } else if fields::fci_contains_aid(&fci, &AID_EZL_IN_FCI) {
            info!("detected as EZL (nested AID in FCI)");
            CardScheme::Ezl
        } else {
            // Unverified heuristic kept from field observations: KFTC
            // cards without a recognizable nested AID are treated as EZL.
            warn!("cannot distinguish Hipass/EZL from FCI, defaulting to EZL");
            CardScheme::Ezl
        };
        return Detection {
            scheme,
            fci: Some(fci),
        };
    }

    if let Some(fci) = try_select(transceiver, &AID_EZL_ALT1, "EZL-Alt1") {
        return Detection {
            scheme: CardScheme::Ezl,
            fci: Some(fci),
        };
    }
    if let Some(fci) = try_select(transceiver, &AID_EZL_ALT2, "EZL-Alt2") {
        return Detection {
            scheme: CardScheme::Ezl,
            fci: Some(fci),
        };
    }

    if let Some(fci) = try_select(transceiver, &AID_RAILPLUS, "Rail+") {
        return Detection {
            scheme: CardScheme::RailPlus,
            fci: Some(fci),
        };
    }

    warn!("no known card scheme detected, tried all known AIDs");
    Detection {
        scheme: CardScheme::Unknown,
        fci: None,
    }
}

/// Send SELECT for one candidate AID. Any status other than Success, and
/// any transport fault, just skips the candidate.
fn try_select(transceiver: &mut dyn Transceiver, aid: &[u8], name: &str) -> Option<Vec<u8>> {
    let apdu = Apdu::select_aid(aid);
    debug!("trying {} AID: {}", name, bytes_to_hex_spaced(aid));

    let response = match transceiver.exchange(apdu.as_bytes(), DEFAULT_EXCHANGE_TIMEOUT_MS) {
        Ok(response) => response,
        Err(err) => {
            debug!("{} AID exchange failed: {}", name, err);
            return None;
        }
    };

    match split_payload(&response) {
        Ok((payload, StatusWord::Success)) => {
            info!("{} AID selected successfully", name);
            debug!("FCI: {}", bytes_to_hex_spaced(payload));
            Some(payload.to_vec())
        }
        Ok((_, sw)) => {
            debug!("{} AID selection failed: {:?}", name, sw);
            None
        }
        Err(err) => {
            debug!("{} AID returned invalid response: {}", name, err);
            None
        }
    }
}
