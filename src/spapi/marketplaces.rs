//! Amazon marketplace descriptors: codes, SP-API regions, marketplace ids, currencies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SP-API region an endpoint and credential bundle is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpRegion {
    Na,
    Eu,
    Fe,
}

impl SpRegion {
    /// Returns the SP-API endpoint for this region.
    pub fn endpoint(&self) -> &'static str {
        match self {
            SpRegion::Na => "https://sellingpartnerapi-na.amazon.com",
            SpRegion::Eu => "https://sellingpartnerapi-eu.amazon.com",
            SpRegion::Fe => "https://sellingpartnerapi-fe.amazon.com",
        }
    }
}

impl fmt::Display for SpRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            SpRegion::Na => "NA",
            SpRegion::Eu => "EU",
            SpRegion::Fe => "FE",
        };
        write!(f, "{}", code)
    }
}

/// Supported Amazon marketplaces with their externally-assigned identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Marketplace {
    #[default]
    Us,
    Ca,
    Mx,
    Br,
    De,
    Es,
    Fr,
    It,
    Nl,
    Uk,
    Se,
    Pl,
    Eg,
    Tr,
    Sa,
    Ae,
    In,
    Jp,
    Au,
    Sg,
}

impl Marketplace {
    /// Returns the SP-API region this marketplace belongs to.
    pub fn region(&self) -> SpRegion {
        match self {
            Marketplace::Us | Marketplace::Ca | Marketplace::Mx | Marketplace::Br => SpRegion::Na,
            Marketplace::De
            | Marketplace::Es
            | Marketplace::Fr
            | Marketplace::It
            | Marketplace::Nl
            | Marketplace::Uk
            | Marketplace::Se
            | Marketplace::Pl
            | Marketplace::Eg
            | Marketplace::Tr
            | Marketplace::Sa
            | Marketplace::Ae
            | Marketplace::In => SpRegion::Eu,
            Marketplace::Jp | Marketplace::Au | Marketplace::Sg => SpRegion::Fe,
        }
    }

    /// Returns the Amazon-assigned marketplace identifier.
    pub fn marketplace_id(&self) -> &'static str {
        match self {
            Marketplace::Us => "ATVPDKIKX0DER",
            Marketplace::Ca => "A2EUQ1WTGCTBG2",
            Marketplace::Mx => "A1AM78C64UM0Y8",
            Marketplace::Br => "A2Q3Y263D00KWC",
            Marketplace::De => "A1PA6795UKMFR9",
            Marketplace::Es => "A1RKKUPIHCS9HS",
            Marketplace::Fr => "A13V1IB3VIYZZH",
            Marketplace::It => "APJ6JRA9NG5V4",
            Marketplace::Nl => "A1805IZSGTT6HS",
            Marketplace::Uk => "A1F83G8C2ARO7P",
            Marketplace::Se => "A2NODRKZP88ZB9",
            Marketplace::Pl => "A1C3SOZRARQ6R3",
            Marketplace::Eg => "ARBP9OOSHTCHU",
            Marketplace::Tr => "A33AVAJ2PDY3EV",
            Marketplace::Sa => "A17E79C6D8DWNP",
            Marketplace::Ae => "A2VIGQ35RCS4UG",
            Marketplace::In => "A21TJRUUN4KGV",
            Marketplace::Jp => "A1VC38T7YXB528",
            Marketplace::Au => "A39IBJ37TRP1C6",
            Marketplace::Sg => "A19VAU5U5O7RUS",
        }
    }

    /// Returns the SP-API endpoint serving this marketplace.
    pub fn endpoint(&self) -> &'static str {
        self.region().endpoint()
    }

    /// Returns the local currency code for this marketplace.
    pub fn currency(&self) -> &'static str {
        match self {
            Marketplace::Us => "USD",
            Marketplace::Ca => "CAD",
            Marketplace::Mx => "MXN",
            Marketplace::Br => "BRL",
            Marketplace::De
            | Marketplace::Es
            | Marketplace::Fr
            | Marketplace::It
            | Marketplace::Nl => "EUR",
            Marketplace::Uk => "GBP",
            Marketplace::Se => "SEK",
            Marketplace::Pl => "PLN",
            Marketplace::Eg => "EGP",
            Marketplace::Tr => "TRY",
            Marketplace::Sa => "SAR",
            Marketplace::Ae => "AED",
            Marketplace::In => "INR",
            Marketplace::Jp => "JPY",
            Marketplace::Au => "AUD",
            Marketplace::Sg => "SGD",
        }
    }

    /// Returns all supported marketplaces.
    pub fn all() -> &'static [Marketplace] {
        &[
            Marketplace::Us,
            Marketplace::Ca,
            Marketplace::Mx,
            Marketplace::Br,
            Marketplace::De,
            Marketplace::Es,
            Marketplace::Fr,
            Marketplace::It,
            Marketplace::Nl,
            Marketplace::Uk,
            Marketplace::Se,
            Marketplace::Pl,
            Marketplace::Eg,
            Marketplace::Tr,
            Marketplace::Sa,
            Marketplace::Ae,
            Marketplace::In,
            Marketplace::Jp,
            Marketplace::Au,
            Marketplace::Sg,
        ]
    }
}

impl fmt::Display for Marketplace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Marketplace::Us => "US",
            Marketplace::Ca => "CA",
            Marketplace::Mx => "MX",
            Marketplace::Br => "BR",
            Marketplace::De => "DE",
            Marketplace::Es => "ES",
            Marketplace::Fr => "FR",
            Marketplace::It => "IT",
            Marketplace::Nl => "NL",
            Marketplace::Uk => "UK",
            Marketplace::Se => "SE",
            Marketplace::Pl => "PL",
            Marketplace::Eg => "EG",
            Marketplace::Tr => "TR",
            Marketplace::Sa => "SA",
            Marketplace::Ae => "AE",
            Marketplace::In => "IN",
            Marketplace::Jp => "JP",
            Marketplace::Au => "AU",
            Marketplace::Sg => "SG",
        };
        write!(f, "{}", code)
    }
}

impl FromStr for Marketplace {
    type Err = MarketplaceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "US" | "USA" => Ok(Marketplace::Us),
            "CA" => Ok(Marketplace::Ca),
            "MX" => Ok(Marketplace::Mx),
            "BR" => Ok(Marketplace::Br),
            "DE" => Ok(Marketplace::De),
            "ES" => Ok(Marketplace::Es),
            "FR" => Ok(Marketplace::Fr),
            "IT" => Ok(Marketplace::It),
            "NL" => Ok(Marketplace::Nl),
            "UK" | "GB" => Ok(Marketplace::Uk),
            "SE" => Ok(Marketplace::Se),
            "PL" => Ok(Marketplace::Pl),
            "EG" => Ok(Marketplace::Eg),
            "TR" => Ok(Marketplace::Tr),
            "SA" => Ok(Marketplace::Sa),
            "AE" => Ok(Marketplace::Ae),
            "IN" => Ok(Marketplace::In),
            "JP" => Ok(Marketplace::Jp),
            "AU" => Ok(Marketplace::Au),
            "SG" => Ok(Marketplace::Sg),
            _ => Err(MarketplaceParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MarketplaceParseError(String);

impl fmt::Display for MarketplaceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown marketplace '{}'. Valid codes: US, CA, MX, BR, DE, ES, FR, IT, NL, UK, SE, PL, EG, TR, SA, AE, IN, JP, AU, SG",
            self.0
        )
    }
}

impl std::error::Error for MarketplaceParseError {}
