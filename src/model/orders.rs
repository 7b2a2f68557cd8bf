//! Channel options for the orders listing

use super::listing::matches_query;
use super::records::Order;

/// A selectable sales channel derived from the loaded orders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelOption {
    pub name: String,
    pub id: String,
}

impl ChannelOption {
    fn from_order(order: &Order) -> Self {
        let name = order
            .channel_name
            .clone()
            .or_else(|| order.marketplace_account_id.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let id = order
            .marketplace_account_id
            .clone()
            .or_else(|| order.channel_id.clone())
            .unwrap_or_default();
        Self { name, id }
    }

    /// An order belongs to the channel when its account id or channel name matches
    pub fn includes(&self, order: &Order) -> bool {
        let account_id = order.marketplace_account_id.as_deref().unwrap_or_default();
        let channel_name = order.channel_name.as_deref().unwrap_or_default();
        self.id == account_id || self.name == channel_name
    }
}

/// Unique channels in first-seen order
pub fn channel_options(orders: &[Order]) -> Vec<ChannelOption> {
    let mut options: Vec<ChannelOption> = Vec::new();
    for option in orders.iter().map(ChannelOption::from_order) {
        if !options.contains(&option) {
            options.push(option);
        }
    }
    options
}

/// Orders in `channel` whose id or name matches `query`
pub fn filter_orders<'a>(orders: &'a [Order], channel: Option<&ChannelOption>, query: &str) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| channel.map_or(true, |c| c.includes(order)))
        .filter(|order| matches_query(query, &[order.order_id.as_deref(), order.order_name.as_deref()]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn orders() -> Vec<Order> {
        [
            json!({"order_id": "A-1", "channel_name": "Amazon US", "marketplace_account_id": "m1"}),
            json!({"order_id": "A-2", "channel_name": "Amazon US", "marketplace_account_id": "m1"}),
            json!({"order_id": "T-1", "order_name": "Gift", "channel_name": "TikTok", "marketplace_account_id": "m2"}),
            json!({"order_id": "X-1", "u_channel_id": "c9"}),
        ]
        .iter()
        .map(Order::from_value)
        .collect()
    }

    #[test]
    fn test_unique_channels_in_order() {
        let options = channel_options(&orders());
        let names: Vec<&str> = options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Amazon US", "TikTok", "Unknown"]);
        assert_eq!(options[2].id, "c9");
    }

    #[test]
    fn test_filter_by_channel_and_query() {
        let orders = orders();
        let options = channel_options(&orders);

        assert_eq!(filter_orders(&orders, Some(&options[0]), "").len(), 2);
        assert_eq!(filter_orders(&orders, Some(&options[0]), "a-2").len(), 1);

        let gifts = filter_orders(&orders, Some(&options[1]), "gift");
        assert_eq!(gifts.len(), 1);
        assert_eq!(gifts[0].order_id.as_deref(), Some("T-1"));

        assert_eq!(filter_orders(&orders, None, "").len(), 4);
    }
}
