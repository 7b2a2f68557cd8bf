//! Channel account heuristics: marketplace brand and token expiry

use super::records::ChannelAccount;

const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Days before expiry at which a token is flagged
pub const EXPIRY_NOTICE_DAYS: f64 = 30.0;

/// Marketplace brand, in match priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelBrand {
    Amazon,
    TikTok,
    Ebay,
    Walmart,
    Shein,
    Default,
}

impl ChannelBrand {
    const PRIORITY: [ChannelBrand; 5] = [
        ChannelBrand::Amazon,
        ChannelBrand::TikTok,
        ChannelBrand::Ebay,
        ChannelBrand::Walmart,
        ChannelBrand::Shein,
    ];

    fn needle(&self) -> &'static str {
        match self {
            ChannelBrand::Amazon => "amazon",
            ChannelBrand::TikTok => "tiktok",
            ChannelBrand::Ebay => "ebay",
            ChannelBrand::Walmart => "walmart",
            ChannelBrand::Shein => "shein",
            ChannelBrand::Default => "",
        }
    }

    /// Classify an account by its name, channel name and channel-group name
    pub fn classify(account: &ChannelAccount) -> Self {
        let haystacks: Vec<String> = [
            account.name.as_deref(),
            account.channel_name.as_deref(),
            account.channel_group_name.as_deref(),
        ]
        .iter()
        .map(|field| field.unwrap_or_default().to_lowercase())
        .collect();

        Self::PRIORITY
            .into_iter()
            .find(|brand| haystacks.iter().any(|h| h.contains(brand.needle())))
            .unwrap_or(ChannelBrand::Default)
    }

    /// Short logo glyph
    pub fn logo(&self) -> &'static str {
        match self {
            ChannelBrand::Amazon => "a",
            ChannelBrand::TikTok => "♫",
            ChannelBrand::Ebay => "ebay",
            ChannelBrand::Walmart => "W",
            ChannelBrand::Shein => "S",
            ChannelBrand::Default => "?",
        }
    }
}

/// Token lifetime relative to now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    /// Expiry already passed
    Expired,
    /// Fewer than thirty days remaining
    Expiring,
    /// Thirty or more days remaining, or exactly now
    Valid,
    /// No expiry recorded
    Unknown,
}

impl TokenStatus {
    /// Classify an expiry timestamp (Unix seconds) against `now` (Unix seconds)
    pub fn classify(expires_in: Option<i64>, now: i64) -> Self {
        let Some(expires) = expires_in else {
            return TokenStatus::Unknown;
        };

        if expires < now {
            return TokenStatus::Expired;
        }

        let days_left = (expires - now) as f64 / SECONDS_PER_DAY;
        if days_left > 0.0 && days_left < EXPIRY_NOTICE_DAYS {
            TokenStatus::Expiring
        } else {
            TokenStatus::Valid
        }
    }

    pub fn is_expired(&self) -> bool {
        *self == TokenStatus::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DAY: i64 = 86_400;
    const NOW: i64 = 1_750_000_000;

    fn account(value: serde_json::Value) -> ChannelAccount {
        ChannelAccount::from_value(&value)
    }

    #[test]
    fn test_token_expiry_windows() {
        assert_eq!(TokenStatus::classify(Some(NOW + 10 * DAY), NOW), TokenStatus::Expiring);
        assert_eq!(TokenStatus::classify(Some(NOW - 10 * DAY), NOW), TokenStatus::Expired);
        assert_eq!(TokenStatus::classify(Some(NOW + 60 * DAY), NOW), TokenStatus::Valid);
        assert_eq!(TokenStatus::classify(None, NOW), TokenStatus::Unknown);
    }

    #[test]
    fn test_token_expiry_boundaries() {
        assert_eq!(TokenStatus::classify(Some(NOW), NOW), TokenStatus::Valid);
        assert_eq!(TokenStatus::classify(Some(NOW + 30 * DAY), NOW), TokenStatus::Valid);
        assert_eq!(TokenStatus::classify(Some(NOW + 30 * DAY - 1), NOW), TokenStatus::Expiring);
    }

    #[test]
    fn test_brand_from_any_field() {
        assert_eq!(ChannelBrand::classify(&account(json!({"name": "My Amazon US"}))), ChannelBrand::Amazon);
        assert_eq!(
            ChannelBrand::classify(&account(json!({"channel_group": {"name": "eBay Motors"}}))),
            ChannelBrand::Ebay
        );
        assert_eq!(ChannelBrand::classify(&account(json!({}))), ChannelBrand::Default);
    }

    #[test]
    fn test_brand_priority_first_match_wins() {
        let both = account(json!({"name": "walmart", "channel": {"name": "TikTok Shop"}}));
        assert_eq!(ChannelBrand::classify(&both), ChannelBrand::TikTok);
    }
}
