//! Walks the full transaction flow: fill the cart, check out repeatedly
//! until a milestone code is issued, spend the code, then print the stats
//! report.

use std::io::{Write as _, stdout};

use clap::Parser;

use tally::prelude::{StatsReport, Store, demo_catalog, load_catalog};

/// Arguments for the checkout demo
#[derive(Debug, Parser)]
struct CheckoutDemoArgs {
    /// Number of orders to place before spending a code
    #[clap(short, long, default_value_t = 3)]
    orders: u64,

    /// Optional YAML catalog file; the bundled demo catalog is used otherwise
    #[clap(short, long)]
    catalog: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = CheckoutDemoArgs::parse();

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => demo_catalog(),
    };

    let mut store = Store::new(catalog);
    let mut out = stdout();

    let product_ids: Vec<String> = store
        .catalog()
        .products()
        .iter()
        .map(|product| product.id.clone())
        .collect();

    let mut issued = None;

    for n in 0..args.orders {
        for id in product_ids.iter().cycle().skip(usize::try_from(n).unwrap_or(0)).take(2) {
            store.add_item(id, 1)?;
        }

        let summary = store.checkout(None)?;

        writeln!(
            out,
            "{}: charged {:.2}",
            summary.order_id, summary.final_amount
        )?;

        if let Some(code) = summary.new_discount_code {
            writeln!(out, "milestone reached, issued {code}")?;
            issued = Some(code);
        }
    }

    if let Some(code) = issued {
        if let Some(id) = product_ids.first() {
            store.add_item(id, 1)?;
        }

        let quote = store.validate_discount(&code, store.cart().total)?;

        writeln!(
            out,
            "applying {} ({}% off, saves {:.2})",
            quote.code, quote.percentage, quote.amount
        )?;

        let summary = store.checkout(Some(&code))?;

        writeln!(
            out,
            "{}: charged {:.2} after discount",
            summary.order_id, summary.final_amount
        )?;
    }

    let stats = store.stats();

    StatsReport::new(&stats).write_to(&mut out)?;

    Ok(())
}
