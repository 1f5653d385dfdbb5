//! Channel normalizer.

use std::fmt;

use serde::{Serialize, Serializer};

/// Raw channel code excluded from every report.
pub const NON_REPORTABLE_CODE: &str = "9";

/// Raw channel codes whose actual sales feed the royalty basis.
pub const RETAIL_CHANNEL_CODES: [&str; 5] = ["3", "4", "5", "7", "11"];

/// Canonical sales channel.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Channel {
    /// 플래그쉽
    Flagship,
    /// 백화점
    Department,
    /// 대리점
    Agency,
    /// 직영(가두)
    DirectStreet,
    /// 온라인(직)
    OnlineDirect,
    /// 온라인(제휴)
    OnlinePartner,
    /// 면세점
    DutyFree,
    /// RF
    Rf,
    /// 아울렛(직)
    OutletDirect,
    /// 사입
    Wholesale,
    /// 기타
    Other,
    /// A management channel name with no canonical mapping.
    Unmapped(String),
}

impl Channel {
    /// Korean display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Flagship => "플래그쉽",
            Self::Department => "백화점",
            Self::Agency => "대리점",
            Self::DirectStreet => "직영(가두)",
            Self::OnlineDirect => "온라인(직)",
            Self::OnlinePartner => "온라인(제휴)",
            Self::DutyFree => "면세점",
            Self::Rf => "RF",
            Self::OutletDirect => "아울렛(직)",
            Self::Wholesale => "사입",
            Self::Other => "기타",
            Self::Unmapped(name) => name,
        }
    }

    /// Maps a display name back to a channel. Unknown names stay unmapped.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "플래그쉽" => Self::Flagship,
            "백화점" => Self::Department,
            "대리점" => Self::Agency,
            "직영(가두)" => Self::DirectStreet,
            "온라인(직)" => Self::OnlineDirect,
            "온라인(제휴)" => Self::OnlinePartner,
            "면세점" => Self::DutyFree,
            "RF" => Self::Rf,
            "아울렛(직)" => Self::OutletDirect,
            "사입" => Self::Wholesale,
            "기타" => Self::Other,
            other => Self::Unmapped(other.to_string()),
        }
    }

    /// Position in report tables. The overall total row sits at 0.
    #[must_use]
    pub const fn display_rank(&self) -> u8 {
        match self {
            Self::Flagship => 1,
            Self::Department => 2,
            Self::Agency => 3,
            Self::DirectStreet => 4,
            Self::OnlineDirect => 5,
            Self::OnlinePartner => 6,
            Self::DutyFree => 7,
            Self::Rf => 8,
            Self::OutletDirect => 9,
            Self::Wholesale => 10,
            Self::Other => 11,
            Self::Unmapped(_) => 12,
        }
    }

    /// Channels whose shipping price is capped at the actual sale price.
    #[must_use]
    pub const fn caps_shipping_at_actual(&self) -> bool {
        matches!(
            self,
            Self::DirectStreet
                | Self::OnlineDirect
                | Self::OnlinePartner
                | Self::OutletDirect
                | Self::Wholesale
                | Self::Other
        )
    }

    /// Sort key for report tables: display rank, then name.
    #[must_use]
    pub fn sort_key(&self) -> (u8, &str) {
        (self.display_rank(), self.name())
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Channel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// The three channel identifiers carried by a fact row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelKey {
    /// Raw channel code on the fact row.
    pub raw_code: Option<String>,
    /// Management channel code from the shop master.
    pub mgmt_code: Option<String>,
    /// Management channel name from the shop master.
    pub mgmt_name: Option<String>,
}

/// Whether a raw channel code may appear in reports.
#[must_use]
pub fn is_reportable(raw_code: Option<&str>) -> bool {
    raw_code.is_some_and(|code| code != NON_REPORTABLE_CODE)
}

/// Normalizes a channel key. Returns `None` for non-reportable rows.
///
/// Management codes win over names, names over raw codes. A row with no
/// management name falls through to 기타.
#[must_use]
pub fn normalize(key: &ChannelKey) -> Option<Channel> {
    let raw = key.raw_code.as_deref();
    if !is_reportable(raw) {
        return None;
    }

    let mgmt_name = key.mgmt_name.as_deref();
    let channel = match key.mgmt_code.as_deref() {
        Some("4") => Channel::OnlineDirect,
        Some("5") => Channel::OnlinePartner,
        Some("3" | "11" | "C3") => Channel::DirectStreet,
        _ if mgmt_name.is_some_and(|n| n.starts_with("아울렛")) => Channel::OutletDirect,
        _ => match (mgmt_name, raw) {
            (Some("백화점"), _) => Channel::Department,
            (Some("대리점"), _) => Channel::Agency,
            (Some("면세점"), _) => Channel::DutyFree,
            (_, Some("8")) => Channel::Wholesale,
            (_, Some("99")) | (None, _) => Channel::Other,
            (Some(name), _) => Channel::from_name(name),
        },
    };
    Some(channel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn key(raw: &str, mgmt_code: &str, mgmt_name: &str) -> ChannelKey {
        let opt = |s: &str| (!s.is_empty()).then(|| s.to_string());
        ChannelKey {
            raw_code: opt(raw),
            mgmt_code: opt(mgmt_code),
            mgmt_name: opt(mgmt_name),
        }
    }

    #[rstest]
    #[case(key("1", "4", "백화점"), Channel::OnlineDirect)]
    #[case(key("1", "5", ""), Channel::OnlinePartner)]
    #[case(key("1", "3", ""), Channel::DirectStreet)]
    #[case(key("1", "11", ""), Channel::DirectStreet)]
    #[case(key("1", "C3", ""), Channel::DirectStreet)]
    #[case(key("1", "2", "아울렛(직영)"), Channel::OutletDirect)]
    #[case(key("8", "2", "백화점"), Channel::Department)]
    #[case(key("2", "6", "대리점"), Channel::Agency)]
    #[case(key("6", "7", "면세점"), Channel::DutyFree)]
    #[case(key("8", "8", "도매"), Channel::Wholesale)]
    #[case(key("99", "99", "기타채널"), Channel::Other)]
    #[case(key("1", "1", "플래그쉽"), Channel::Flagship)]
    #[case(key("7", "12", "RF"), Channel::Rf)]
    #[case(key("7", "12", "팝업"), Channel::Unmapped("팝업".to_string()))]
    #[case(key("7", "", ""), Channel::Other)]
    fn test_normalize_waterfall(#[case] input: ChannelKey, #[case] expected: Channel) {
        assert_eq!(normalize(&input), Some(expected));
    }

    #[rstest]
    #[case(key("9", "4", "온라인"))]
    #[case(key("", "4", "온라인"))]
    fn test_non_reportable_rows_are_dropped(#[case] input: ChannelKey) {
        assert_eq!(normalize(&input), None);
    }

    #[test]
    fn test_display_order() {
        let mut channels = vec![
            Channel::Unmapped("팝업".to_string()),
            Channel::Other,
            Channel::Department,
            Channel::Flagship,
            Channel::OnlineDirect,
        ];
        channels.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let names: Vec<&str> = channels.iter().map(Channel::name).collect();
        assert_eq!(names, ["플래그쉽", "백화점", "온라인(직)", "기타", "팝업"]);
    }

    #[test]
    fn test_from_name_round_trips_canonical_names() {
        for channel in [
            Channel::Flagship,
            Channel::Department,
            Channel::Agency,
            Channel::DirectStreet,
            Channel::OnlineDirect,
            Channel::OnlinePartner,
            Channel::DutyFree,
            Channel::Rf,
            Channel::OutletDirect,
            Channel::Wholesale,
            Channel::Other,
        ] {
            assert_eq!(Channel::from_name(channel.name()), channel);
        }
    }

    #[test]
    fn test_shipping_cap_channels() {
        assert!(Channel::OnlineDirect.caps_shipping_at_actual());
        assert!(Channel::Wholesale.caps_shipping_at_actual());
        assert!(!Channel::Department.caps_shipping_at_actual());
        assert!(!Channel::DutyFree.caps_shipping_at_actual());
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&Channel::DirectStreet).unwrap();
        assert_eq!(json, "\"직영(가두)\"");
    }
}
