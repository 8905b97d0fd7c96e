//! Plain-text receipt rendering.
//!
//! ```text
//! Output 1:
//! 1 book: 12.49
//! 1 music CD: 16.49
//! 1 chocolate bar: 0.85
//! Sales Taxes: 1.50
//! Total: 29.83
//! ```

use receipt_core::Receipt;

/// Renders a receipt, one line per item followed by the tax and total lines.
///
/// No trailing newline.
pub fn render(receipt: &Receipt, header: Option<&str>) -> String {
    header
        .map(|h| format!("{h}:"))
        .into_iter()
        .chain(
            receipt
                .items()
                .iter()
                .map(|line| format!("{} {}: {}", line.quantity, line.name, line.price)),
        )
        .chain([
            format!("Sales Taxes: {}", receipt.sales_tax()),
            format!("Total: {}", receipt.total()),
        ])
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use receipt_core::{LineItem, TaxPolicy};

    fn receipt(items: &[(i64, &str, &str)]) -> Receipt {
        let policy = TaxPolicy::default();
        let now = Utc::now();
        let mut receipt = Receipt::open("input1", now);
        for (qty, name, price) in items {
            let item = LineItem::parse(*qty, *name, price).unwrap();
            receipt.push(policy.price(&item), now).unwrap();
        }
        receipt
    }

    #[test]
    fn test_render_basket_one() {
        let r = receipt(&[
            (1, "book", "12.49"),
            (1, "music CD", "14.99"),
            (1, "chocolate bar", "0.85"),
        ]);

        assert_eq!(
            render(&r, Some("Output 1")),
            "Output 1:\n\
             1 book: 12.49\n\
             1 music CD: 16.49\n\
             1 chocolate bar: 0.85\n\
             Sales Taxes: 1.50\n\
             Total: 29.83"
        );
    }

    #[test]
    fn test_render_without_header() {
        let r = receipt(&[(2, "imported box of chocolates", "10.00")]);

        assert_eq!(
            render(&r, None),
            "2 imported box of chocolates: 10.50\nSales Taxes: 0.50\nTotal: 10.50"
        );
    }

    #[test]
    fn test_render_empty_receipt() {
        let r = Receipt::open("empty", Utc::now());
        assert_eq!(render(&r, None), "Sales Taxes: 0.00\nTotal: 0.00");
    }
}
