//! The three sample baskets.

use receipt_core::{LineItem, Receipt, ValidationError};
use receipt_db::{DbResult, ReceiptBook};

/// (quantity, name, unit price)
pub type Entry = (i64, &'static str, &'static str);

pub const BASKETS: [(&str, &[Entry]); 3] = [
    (
        "input1",
        &[
            (1, "book", "12.49"),
            (1, "music CD", "14.99"),
            (1, "chocolate bar", "0.85"),
        ],
    ),
    (
        "input2",
        &[
            (1, "imported box of chocolates", "10.00"),
            (1, "imported bottle of perfume", "47.50"),
        ],
    ),
    (
        "input3",
        &[
            (1, "imported bottle of perfume", "27.99"),
            (1, "bottle of perfume", "18.99"),
            (1, "packet of headache pills", "9.75"),
            (1, "box of imported chocolates", "11.25"),
        ],
    ),
];

pub fn parse_basket(entries: &[Entry]) -> Result<Vec<LineItem>, ValidationError> {
    entries
        .iter()
        .map(|&(qty, name, price)| LineItem::parse(qty, name, price))
        .collect()
}

/// Saves every basket into `book`, then checks each one out in order.
pub async fn run(book: &ReceiptBook) -> DbResult<Vec<Receipt>> {
    for (key, entries) in BASKETS {
        for item in parse_basket(entries)? {
            book.save_item(key, &item).await?;
        }
    }

    let mut receipts = Vec::with_capacity(BASKETS.len());
    for (key, _) in BASKETS {
        if let Some(receipt) = book.checkout(key).await? {
            receipts.push(receipt);
        }
    }
    Ok(receipts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use receipt_db::InMemoryStore;

    use crate::printer::render;

    #[tokio::test]
    async fn test_demo_output() {
        let book = ReceiptBook::new(Arc::new(InMemoryStore::new()));
        let receipts = run(&book).await.unwrap();
        assert_eq!(receipts.len(), 3);

        let rendered: Vec<String> = receipts
            .iter()
            .enumerate()
            .map(|(i, r)| render(r, Some(&format!("Output {}", i + 1))))
            .collect();

        assert_eq!(
            rendered[1],
            "Output 2:\n\
             1 imported box of chocolates: 10.50\n\
             1 imported bottle of perfume: 54.65\n\
             Sales Taxes: 7.65\n\
             Total: 65.15"
        );
        assert_eq!(
            rendered[2],
            "Output 3:\n\
             1 imported bottle of perfume: 32.19\n\
             1 bottle of perfume: 20.89\n\
             1 packet of headache pills: 9.75\n\
             1 box of imported chocolates: 11.85\n\
             Sales Taxes: 6.70\n\
             Total: 74.68"
        );

        assert!(book.open_keys().await.unwrap().is_empty());
    }

    #[test]
    fn test_baskets_parse() {
        for (key, entries) in BASKETS {
            assert_eq!(parse_basket(entries).unwrap().len(), entries.len(), "{key}");
        }
    }
}
