use serde::{Deserialize, Serialize};

/// Verdict recorded for a take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TakeStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "NG")]
    Ng,
    #[default]
    #[serde(rename = "KEEP")]
    Keep,
}

impl TakeStatus {
    pub const ALL: [TakeStatus; 3] = [TakeStatus::Ok, TakeStatus::Ng, TakeStatus::Keep];

    pub fn as_str(self) -> &'static str {
        match self {
            TakeStatus::Ok => "OK",
            TakeStatus::Ng => "NG",
            TakeStatus::Keep => "KEEP",
        }
    }

    /// Case-insensitive parse of the wire names.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|st| st.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for TakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(TakeStatus::parse("ok"), Some(TakeStatus::Ok));
        assert_eq!(TakeStatus::parse(" Ng "), Some(TakeStatus::Ng));
        assert_eq!(TakeStatus::parse("KEEP"), Some(TakeStatus::Keep));
        assert_eq!(TakeStatus::parse("maybe"), None);
    }

    #[test]
    fn serializes_as_wire_names() {
        assert_eq!(serde_json::to_string(&TakeStatus::Ng).unwrap(), "\"NG\"");
        let st: TakeStatus = serde_json::from_str("\"KEEP\"").unwrap();
        assert_eq!(st, TakeStatus::Keep);
    }
}
