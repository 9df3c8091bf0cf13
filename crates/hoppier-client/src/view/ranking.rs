use serde::Serialize;

use crate::aggregate::{AmountIndex, NameIndex};
use crate::money::Currency;
use crate::view::page::resolve_name;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserTotalRow {
    pub rank: usize,
    pub card_id: String,
    pub name: String,
    pub total_cents: f64,
    pub total: String,
}

/// Ranks every card holder by descending total in `currency`.
///
/// The sort is stable: equal totals keep the order of `user_totals`, which is
/// the order card ids first appeared in the transaction list.
pub fn project_user_ranking(
    user_totals: &AmountIndex,
    user_names: &NameIndex,
    currency: Currency,
) -> Vec<UserTotalRow> {
    let mut entries = user_totals.iter().collect::<Vec<_>>();
    entries.sort_by(|(_, left), (_, right)| {
        right.amount(currency).total_cmp(&left.amount(currency))
    });

    entries
        .into_iter()
        .enumerate()
        .map(|(index, (card_id, pair))| UserTotalRow {
            rank: index + 1,
            card_id: card_id.clone(),
            name: resolve_name(user_names, card_id),
            total_cents: pair.amount(currency),
            total: pair.formatted(currency),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::project_user_ranking;
    use crate::aggregate::{AmountIndex, NameIndex, aggregate};
    use crate::money::{Currency, MoneyPair};
    use crate::records::{Merchant, RawAmount, Transaction, User};
    use crate::view::UNKNOWN_NAME;

    fn totals(entries: &[(&str, i64)]) -> AmountIndex {
        entries
            .iter()
            .map(|(card_id, cents)| (card_id.to_string(), MoneyPair::from_usd_cents(*cents)))
            .collect()
    }

    #[test]
    fn worked_example_ranks_in_both_currencies() {
        let users = vec![User {
            card_id: "A".to_string(),
            first_name: "Jo".to_string(),
            last_name: "Lee".to_string(),
        }];
        let merchants = vec![Merchant {
            network_id: "M1".to_string(),
            name: "Shop".to_string(),
        }];
        let transactions = [("1", 1000), ("2", 500)]
            .into_iter()
            .map(|(id, cents)| Transaction {
                id: id.to_string(),
                date: Some("2021-01-05".to_string()),
                card_id: "A".to_string(),
                merchant_network_id: "M1".to_string(),
                amount_in_usd_cents: RawAmount::Cents(cents),
            })
            .collect::<Vec<_>>();
        let result = aggregate(&users, &merchants, &transactions);

        let usd = project_user_ranking(&result.user_totals, &result.user_names, Currency::Usd);
        let cad = project_user_ranking(&result.user_totals, &result.user_names, Currency::Cad);

        assert_eq!(usd.len(), 1);
        assert_eq!(usd[0].name, "Jo Lee");
        assert_eq!(usd[0].total, "$15.00");
        assert_eq!(cad[0].total, "$18.75");
        assert_eq!(cad[0].total_cents, 1875.0);
    }

    #[test]
    fn ranking_is_descending_and_covers_every_card_once() {
        let index = totals(&[("A", 300), ("B", 1200), ("C", -50), ("D", 700), ("E", 0)]);

        let rows = project_user_ranking(&index, &NameIndex::new(), Currency::Cad);

        assert!(
            rows.windows(2)
                .all(|pair| pair[0].total_cents >= pair[1].total_cents)
        );
        let cards = rows
            .iter()
            .map(|row| row.card_id.as_str())
            .collect::<HashSet<&str>>();
        assert_eq!(cards.len(), index.len());
        assert!(index.keys().all(|key| cards.contains(key.as_str())));
        assert_eq!(
            rows.iter().map(|row| row.rank).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let index = totals(&[("late", 500), ("B", 900), ("early", 500), ("C", 500)]);

        let rows = project_user_ranking(&index, &NameIndex::new(), Currency::Usd);

        assert_eq!(
            rows.iter().map(|row| row.card_id.as_str()).collect::<Vec<_>>(),
            vec!["B", "late", "early", "C"]
        );
    }

    #[test]
    fn unknown_card_holders_use_sentinel_name() {
        let index = totals(&[("ghost", 100)]);

        let rows = project_user_ranking(&index, &NameIndex::new(), Currency::Usd);

        assert_eq!(rows[0].name, UNKNOWN_NAME);
        assert_eq!(rows[0].total, "$1.00");
    }
}
