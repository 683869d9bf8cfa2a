//! # Report Rendering
//!
//! ## Text Layout
//! ```text
//! Draft #1  cash  INVALID
//!   Subtotal        $20.00
//!   Tax             $3.00
//!   Discount        $0.00
//!   Total           $23.00
//!   Tendered        $20.00
//!   Change due      $0.00
//!   Outstanding     $3.00
//!   Failures:
//!     - amountTendered: payment is short by $3.00; ... [insufficient_payment]
//! ```

use std::io::Write;

use meridian_core::{Money, OrderDraft, ReconciliationResult};

use crate::batch::Batch;
use crate::config::CliConfig;
use crate::error::CliResult;

/// Writes the results as pretty JSON: one object for a single draft, an
/// array otherwise.
pub fn write_json<W: Write>(
    out: &mut W,
    batch: &Batch,
    results: &[ReconciliationResult],
) -> CliResult<()> {
    match (batch, results) {
        (Batch::Single(_), [result]) => serde_json::to_writer_pretty(&mut *out, result)?,
        _ => serde_json::to_writer_pretty(&mut *out, results)?,
    }
    writeln!(out)?;
    Ok(())
}

/// Writes a human-readable breakdown of every draft.
pub fn write_text<W: Write>(
    out: &mut W,
    config: &CliConfig,
    drafts: &[OrderDraft],
    results: &[ReconciliationResult],
) -> CliResult<()> {
    for (index, (draft, result)) in drafts.iter().zip(results).enumerate() {
        if index > 0 {
            writeln!(out)?;
        }

        writeln!(
            out,
            "Draft #{}  {}  {}",
            index + 1,
            draft.payment_method,
            if result.valid { "VALID" } else { "INVALID" }
        )?;

        write_row(out, config, "Subtotal", result.subtotal)?;
        write_row(out, config, "Tax", result.tax_amount)?;
        write_row(out, config, "Discount", result.applied_discount)?;
        write_row(out, config, "Total", result.total)?;
        if draft.payment_method.is_split() {
            write_row(out, config, "Split total", result.split_total)?;
        }
        write_row(out, config, "Tendered", result.amount_tendered)?;
        write_row(out, config, "Change due", result.change_due)?;
        write_row(out, config, "Outstanding", result.outstanding_balance)?;

        if !result.failures.is_empty() {
            writeln!(out, "  Failures:")?;
            for failure in &result.failures {
                writeln!(out, "    - {}", failure)?;
            }
        }
    }

    if drafts.len() > 1 {
        let invalid = results.iter().filter(|r| !r.valid).count();
        writeln!(out)?;
        writeln!(
            out,
            "{} draft(s), {} invalid ({})",
            drafts.len(),
            invalid,
            config.display.currency_code
        )?;
    }

    Ok(())
}

fn write_row<W: Write>(
    out: &mut W,
    config: &CliConfig,
    label: &str,
    amount: Money,
) -> std::io::Result<()> {
    writeln!(out, "  {:<15} {}", label, config.format_currency(amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::{reconcile, LineItem, PaymentMethod, TaxRate};
    use rust_decimal_macros::dec;

    fn day_pass(tendered: Money) -> OrderDraft {
        OrderDraft::new(
            vec![LineItem::new("Day pass", 2, Money::new(dec!(10)))],
            PaymentMethod::Cash,
        )
        .with_tax_rate(TaxRate::from_percent(dec!(15)))
        .with_amount_tendered(tendered)
    }

    fn render_text(config: &CliConfig, drafts: &[OrderDraft]) -> String {
        let results: Vec<_> = drafts.iter().map(reconcile).collect();
        let mut out = Vec::new();
        write_text(&mut out, config, drafts, &results).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_valid_draft() {
        let text = render_text(&CliConfig::default(), &[day_pass(Money::new(dec!(23)))]);

        assert!(text.starts_with("Draft #1  cash  VALID\n"));
        assert!(text.contains("  Total           $23.00\n"));
        assert!(!text.contains("Failures"));
        assert!(!text.contains("Split total"));
    }

    #[test]
    fn test_text_lists_failures() {
        let text = render_text(&CliConfig::default(), &[day_pass(Money::new(dec!(20)))]);

        assert!(text.contains("INVALID"));
        assert!(text.contains("  Outstanding     $3.00\n"));
        assert!(text.contains("    - amountTendered: "));
        assert!(text.contains("[insufficient_payment]"));
    }

    #[test]
    fn test_text_uses_configured_currency() {
        let mut config = CliConfig::default();
        config.display.currency_symbol = "€".to_string();
        config.display.currency_code = "EUR".to_string();

        let drafts = [day_pass(Money::new(dec!(23))), day_pass(Money::new(dec!(1)))];
        let text = render_text(&config, &drafts);

        assert!(text.contains("  Total           €23.00\n"));
        assert!(text.contains("Draft #2"));
        assert!(text.ends_with("2 draft(s), 1 invalid (EUR)\n"));
    }

    #[test]
    fn test_json_mirrors_input_shape() {
        let draft = day_pass(Money::new(dec!(23)));
        let results = vec![reconcile(&draft)];

        let mut single = Vec::new();
        write_json(&mut single, &Batch::Single(draft.clone()), &results).unwrap();
        let single: serde_json::Value = serde_json::from_slice(&single).unwrap();
        assert_eq!(single["total"], "23.00");

        let mut many = Vec::new();
        write_json(&mut many, &Batch::Many(vec![draft]), &results).unwrap();
        let many: serde_json::Value = serde_json::from_slice(&many).unwrap();
        assert_eq!(many[0]["valid"], true);
    }
}
