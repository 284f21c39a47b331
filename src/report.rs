//! Stats report

use std::io;

use tabled::{
    builder::Builder,
    settings::{
        Alignment, Color, Style,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{discounts::DiscountCode, store::StoreStats};

/// Errors that can occur while rendering a stats report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Output sink failed
    #[error("Failed to write report")]
    IO,
}

/// Console renderer for [`StoreStats`].
#[derive(Debug)]
pub struct StatsReport<'a> {
    stats: &'a StoreStats,
}

impl<'a> StatsReport<'a> {
    /// Create a report over a stats snapshot.
    pub fn new(stats: &'a StoreStats) -> Self {
        StatsReport { stats }
    }

    /// Render the totals table and the discount-code table.
    ///
    /// # Errors
    ///
    /// Returns a [`ReportError`] if the report cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReportError> {
        write_totals_table(&mut out, self.stats)?;
        write_codes_table(&mut out, &self.stats.discount_codes)?;

        Ok(())
    }
}

fn write_totals_table(out: &mut impl io::Write, stats: &StoreStats) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Metric", "Value"]);
    builder.push_record(["Total orders".to_owned(), stats.total_orders.to_string()]);
    builder.push_record([
        "Items purchased".to_owned(),
        stats.total_items_purchased.to_string(),
    ]);
    builder.push_record([
        "Revenue".to_owned(),
        format!("{:.2}", stats.total_purchase_amount),
    ]);
    builder.push_record([
        "Discount given".to_owned(),
        format!("{:.2}", stats.total_discount_amount),
    ]);
    builder.push_record([
        "Next discount order".to_owned(),
        stats.next_discount_order_number.to_string(),
    ]);

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(1..2), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::IO)
}

fn write_codes_table(
    out: &mut impl io::Write,
    codes: &[DiscountCode],
) -> Result<(), ReportError> {
    if codes.is_empty() {
        return writeln!(out, "No discount codes issued").map_err(|_err| ReportError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Code", "Status", "Created", "Used"]);

    for code in codes {
        let status = if code.is_used { "used" } else { "available" };

        builder.push_record([
            code.code.clone(),
            status.to_owned(),
            code.created_at.to_string(),
            code.used_at.map_or_else(String::new, |at| at.to_string()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Rows::first(), Color::BOLD);

    writeln!(out, "{table}").map_err(|_err| ReportError::IO)
}
