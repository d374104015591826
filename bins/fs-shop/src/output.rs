//! Terminal output helpers.

use foodshare_shopping::ProductResult;
use owo_colors::OwoColorize;

/// Status message helpers
pub struct Status;

impl Status {
    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.bold());
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// One shopping-list line; placeholders carry `(<marker>)` at the end
pub fn print_product(product: &ProductResult, not_found_marker: &str) {
    if product.name.ends_with(&format!("({})", not_found_marker)) {
        println!("  {} {}", "✗".red(), product.name.dimmed());
    } else {
        println!("  {} {} {}", "✓".green(), product.name, format_price(product.price).cyan());
    }
}

/// Price with two decimals and a euro sign
pub fn format_price(price: f64) -> String {
    format!("{:.2} €", price)
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(4.5), "4.50 €");
        assert_eq!(format_price(0.0), "0.00 €");
    }

    #[test]
    fn test_format_count_singular() {
        assert_eq!(format_count(1, "product", "products"), "1 product");
    }

    #[test]
    fn test_format_count_plural() {
        assert_eq!(format_count(3, "product", "products"), "3 products");
    }
}
