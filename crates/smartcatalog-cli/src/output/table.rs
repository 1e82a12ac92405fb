use smartcatalog_core::links::pdf_page_link;
use smartcatalog_core::model::{BoqResult, MatchStatus, Product};
use smartcatalog_core::{Facet, FacetOptions};

const COLORS_SHOWN: usize = 3;

pub fn print_products(products: &[Product], storage_url: &str) {
    if products.is_empty() {
        return;
    }

    let rows: Vec<[String; 7]> = products
        .iter()
        .map(|p| {
            [
                or_dash(p.name()),
                or_dash(p.brand()),
                or_dash(p.designer()),
                p.year.map(|y| y.to_string()).unwrap_or_else(|| "-".into()),
                or_dash(p.product_type()),
                colors_summary(&p.all_colors),
                page_link(p, storage_url),
            ]
        })
        .collect();

    let header = [
        "Product Name",
        "Brand",
        "Designer",
        "Year",
        "Type",
        "Colors",
        "PDF Page",
    ];
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in &rows {
        // The link column is left unpadded.
        for (w, cell) in widths.iter_mut().zip(row.iter()).take(6) {
            *w = (*w).max(cell.chars().count());
        }
    }

    print_row(&header.map(String::from), &widths);
    println!(
        "  {}",
        "-".repeat(widths.iter().take(6).sum::<usize>() + 6 * 2 + header[6].len())
    );
    for row in &rows {
        print_row(row, &widths);
    }
    println!();
}

fn print_row(cells: &[String; 7], widths: &[usize]) {
    let mut line = String::from(" ");
    for (i, cell) in cells.iter().enumerate() {
        if i == cells.len() - 1 {
            line.push_str(&format!(" {cell}"));
        } else {
            line.push_str(&format!(" {:<width$} ", cell, width = widths[i]));
        }
    }
    println!("{}", line.trim_end());
}

pub fn print_product(product: &Product, storage_url: &str) {
    println!("=== {} ===\n", or_dash(product.name()));
    println!("  Id:        {}", product.id);
    println!("  Brand:     {}", or_dash(product.brand()));
    println!("  Designer:  {}", or_dash(product.designer()));
    println!(
        "  Year:      {}",
        product
            .year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "-".into())
    );
    println!("  Type:      {}", or_dash(product.product_type()));
    if product.all_colors.is_empty() {
        println!("  Colors:    -");
    } else {
        println!("  Colors:    {}", product.all_colors.join(", "));
    }
    println!("  PDF page:  {}", page_link(product, storage_url));

    if let Some(ref prices) = product.price_data {
        if !prices.is_empty() {
            println!("\n  Prices:");
            let max_key = prices.keys().map(|k| k.chars().count()).max().unwrap_or(0);
            for (key, value) in prices {
                let shown = value
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".into());
                println!("    {:<width$}  {}", key, shown, width = max_key);
            }
        }
    }
    println!();
}

pub fn print_facets(options: &FacetOptions) {
    for facet in Facet::ALL {
        let values = options.for_facet(facet);
        println!("{} ({})", facet.label(), values.len());
        for v in values {
            let shown = facet.display_value(v);
            if shown == v.as_str() {
                println!("  {v}");
            } else {
                println!("  {shown}  [{v}]");
            }
        }
        println!();
    }
}

pub fn print_boq(results: &[BoqResult], storage_url: &str) {
    for (i, result) in results.iter().enumerate() {
        let item = &result.boq_item;
        println!(
            "{:>3}. {}  (brand: {}, type: {})",
            i + 1,
            item.name,
            item.brand,
            item.product_type
        );

        if result.status == MatchStatus::NotFound || result.matches.is_empty() {
            let msg = result.message.as_deref().unwrap_or("No matching products found");
            println!("     not found: {msg}\n");
            continue;
        }

        let selected_id = result.selected_match.as_ref().map(|p| p.id);
        for m in &result.matches {
            let marker = if Some(m.id) == selected_id { "*" } else { " " };
            println!(
                "   {} [{}] {} ({})",
                marker,
                m.id,
                or_dash(m.name()),
                or_dash(m.brand())
            );
        }
        match result.selected_match {
            Some(ref p) => println!("     selected: {}  {}", p.id, page_link(p, storage_url)),
            None => println!("     selected: none (use --select {}=ID)", i + 1),
        }
        println!();
    }
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

/// First few colors, then a count of the rest.
fn colors_summary(colors: &[String]) -> String {
    if colors.is_empty() {
        return "-".into();
    }
    let shown = colors
        .iter()
        .take(COLORS_SHOWN)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if colors.len() > COLORS_SHOWN {
        format!("{shown} +{} more", colors.len() - COLORS_SHOWN)
    } else {
        shown
    }
}

fn page_link(product: &Product, storage_url: &str) -> String {
    product
        .page_reference
        .as_ref()
        .and_then(|r| pdf_page_link(storage_url, r))
        .unwrap_or_else(|| "-".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_summary() {
        let colors: Vec<String> = ["red", "blue", "white", "black", "grey"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(colors_summary(&colors), "red, blue, white +2 more");
        assert_eq!(colors_summary(&colors[..2]), "red, blue");
        assert_eq!(colors_summary(&[]), "-");
    }

    #[test]
    fn test_page_link_dash_without_reference() {
        let p = Product {
            id: 1,
            ..Default::default()
        };
        assert_eq!(page_link(&p, "https://cdn.example.com"), "-");
    }
}
