use crate::SpiderError;
use std::fmt;
use std::str::FromStr;

/// Form types the filings aggregator accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormType {
    /// Annual report.
    TenK,
    /// Quarterly report.
    TenQ,
    /// Current report.
    EightK,
    /// Annual report of a foreign private issuer.
    TwentyF,
    /// Current report of a foreign private issuer.
    SixK,
    /// Registration statement.
    S1,
    /// Simplified registration statement.
    S3,
    /// Institutional investment manager holdings.
    ThirteenF,
    /// Prospectus.
    FourTwentyFourB2,
    /// Definitive proxy statement.
    Def14A,
    /// Passive beneficial ownership.
    Sc13G,
    /// Active beneficial ownership.
    Sc13D,
    /// Monthly portfolio holdings of a registered fund.
    NPort,
    /// Shareholder report of a registered fund.
    NCsr,
}

impl FormType {
    pub const ALL: [FormType; 14] = [
        FormType::TenK,
        FormType::TenQ,
        FormType::EightK,
        FormType::TwentyF,
        FormType::SixK,
        FormType::S1,
        FormType::S3,
        FormType::ThirteenF,
        FormType::FourTwentyFourB2,
        FormType::Def14A,
        FormType::Sc13G,
        FormType::Sc13D,
        FormType::NPort,
        FormType::NCsr,
    ];

    /// The form type exactly as EDGAR spells it in submissions.
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::TenK => "10-K",
            FormType::TenQ => "10-Q",
            FormType::EightK => "8-K",
            FormType::TwentyF => "20-F",
            FormType::SixK => "6-K",
            FormType::S1 => "S-1",
            FormType::S3 => "S-3",
            FormType::ThirteenF => "13F",
            FormType::FourTwentyFourB2 => "424B2",
            FormType::Def14A => "DEF 14A",
            FormType::Sc13G => "SC 13G",
            FormType::Sc13D => "SC 13D",
            FormType::NPort => "N-PORT",
            FormType::NCsr => "N-CSR",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact match against the EDGAR spelling; `"10-k"` is not a supported form.
impl FromStr for FormType {
    type Err = SpiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| SpiderError::UnsupportedForm(s.to_string()))
    }
}
