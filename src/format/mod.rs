//! Output formatting for product reports (table, JSON, markdown).
//!
//! This is the only place where absent values render as "N/A"; the report
//! model itself carries `Option`s.

use crate::config::OutputFormat;
use crate::report::ProductReport;

/// Formats reports for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single report.
    pub fn format_report(&self, report: &ProductReport) -> String {
        match self.format {
            OutputFormat::Json => self.json_single(report),
            OutputFormat::Table => self.table_single(report),
            OutputFormat::Markdown => self.markdown_single(report),
        }
    }

    /// Formats multiple reports.
    pub fn format_reports(&self, reports: &[ProductReport]) -> String {
        if reports.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                _ => "No reports produced.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_reports(reports),
            _ => reports
                .iter()
                .map(|r| self.format_report(r))
                .collect::<Vec<_>>()
                .join("\n\n"),
        }
    }

    // JSON formatting

    fn json_single(&self, report: &ProductReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
    }

    fn json_reports(&self, reports: &[ProductReport]) -> String {
        serde_json::to_string_pretty(reports).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_single(&self, report: &ProductReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ASIN:         {}", report.asin));
        lines.push(format!("Marketplace:  {}", report.marketplace));
        lines.push(format!("Title:        {}", or_na(report.title.as_deref())));
        lines.push(format!("Brand:        {}", or_na(report.brand.as_deref())));
        lines.push(format!("EAN:          {}", or_na(report.ean.as_deref())));
        lines.push(format!(
            "Dimensions:   {}",
            or_na(report.dimensions_display.as_deref())
        ));
        lines.push(format!(
            "Weight:       {}",
            report
                .weight_grams
                .map(|w| format!("{:.1} g", w))
                .unwrap_or_else(|| "N/A".to_string())
        ));

        lines.push(format!(
            "Sellable:     {}",
            match report.sellable {
                Some(true) => "Yes",
                Some(false) => "No",
                None => "Unknown",
            }
        ));
        for reason in &report.restriction_reasons {
            lines.push(format!("  Restriction: {}", reason));
        }

        lines.push(format!("Offers:       {}", report.offers.len()));
        for offer in &report.offers {
            let mut tags = Vec::new();
            if offer.buy_box_winner {
                tags.push("buy box");
            }
            if offer.fulfilled_by_platform {
                tags.push("FBA");
            }
            let tags = if tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", tags.join(", "))
            };
            lines.push(format!(
                "  {:.2} {} (listing {:.2} + shipping {:.2}){}",
                offer.effective_price, offer.currency, offer.listing_price, offer.shipping, tags
            ));
        }

        lines.push(format!(
            "Price:        {}",
            money(report.reference_price, report.reference_currency.as_deref())
        ));

        let fee_currency = report.fees.currency.as_deref();
        lines.push(format!(
            "Fees:         {}",
            money(report.fees.total_fees, fee_currency)
        ));
        lines.push(format!(
            "Net profit:   {}",
            money(report.fees.net_profit, fee_currency)
        ));

        if let Some(converted) = &report.converted {
            lines.push(format!(
                "In {}:       price {}, fees {}, net {}",
                converted.currency,
                money(converted.reference_price, None),
                money(converted.total_fees, None),
                money(converted.net_profit, None),
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_single(&self, report: &ProductReport) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "## {} ({})",
            report.title.as_deref().unwrap_or(&report.asin),
            report.marketplace
        ));
        lines.push(String::new());
        lines.push(format!("- **ASIN:** {}", report.asin));

        if let Some(brand) = &report.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        if let Some(ean) = &report.ean {
            lines.push(format!("- **EAN:** {}", ean));
        }
        if let Some(image) = &report.image_url {
            lines.push(format!("- **Image:** [link]({})", image));
        }
        if let Some(dims) = &report.dimensions_display {
            lines.push(format!("- **Dimensions:** {}", dims));
        }
        if let Some(weight) = report.weight_grams {
            lines.push(format!("- **Weight:** {:.1} g", weight));
        }

        lines.push(format!(
            "- **Sellable:** {}",
            match report.sellable {
                Some(true) => "yes",
                Some(false) => "no",
                None => "unknown",
            }
        ));
        if !report.restriction_reasons.is_empty() {
            lines.push(format!(
                "- **Restrictions:** {}",
                report.restriction_reasons.join("; ")
            ));
        }

        lines.push(format!(
            "- **Price:** {}",
            money(report.reference_price, report.reference_currency.as_deref())
        ));
        lines.push(format!(
            "- **Fees:** {}",
            money(report.fees.total_fees, report.fees.currency.as_deref())
        ));
        lines.push(format!(
            "- **Net profit:** {}",
            money(report.fees.net_profit, report.fees.currency.as_deref())
        ));

        if let Some(converted) = &report.converted {
            lines.push(format!(
                "- **Net profit ({}):** {}",
                converted.currency,
                money(converted.net_profit, None)
            ));
        }

        if !report.offers.is_empty() {
            lines.push(String::new());
            lines.push("| Effective | Listing | Shipping | FBA | Buy box |".to_string());
            lines.push("|-----------|---------|----------|-----|---------|".to_string());
            for offer in &report.offers {
                lines.push(format!(
                    "| {:.2} {} | {:.2} | {:.2} | {} | {} |",
                    offer.effective_price,
                    offer.currency,
                    offer.listing_price,
                    offer.shipping,
                    if offer.fulfilled_by_platform { "✓" } else { "" },
                    if offer.buy_box_winner { "✓" } else { "" },
                ));
            }
        }

        lines.join("\n")
    }
}

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

fn money(amount: Option<f64>, currency: Option<&str>) -> String {
    match (amount, currency) {
        (Some(a), Some(c)) => format!("{:.2} {}", a, c),
        (Some(a), None) => format!("{:.2}", a),
        (None, _) => "N/A".to_string(),
    }
}
