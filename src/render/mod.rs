// src/render/mod.rs
use chrono::{DateTime, Utc};

use crate::catalog::CatalogTable;
use crate::extractors::Listing;

const STYLE: &str = "\
body { font-family: sans-serif; margin: 2em; color: #1f2937; }\n\
nav a { margin-right: 1em; color: #0d9488; text-decoration: none; }\n\
nav a:hover { text-decoration: underline; }\n\
table.table { border-collapse: collapse; margin-top: 1em; }\n\
table.table th, table.table td { padding: 0.4em 0.8em; border: 1px solid #d1d5db; text-align: left; }\n\
table.table-striped tbody tr:nth-child(odd) { background-color: #f3f4f6; }\n\
p.meta { color: #6b7280; font-size: 0.9em; }\n\
img.chart { max-width: 100%; border: 1px solid #d1d5db; }\n";

/// Escapes text for inclusion in HTML element content or attribute values.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wraps body markup in the common page shell: doctype, inline styles and
/// the navigation bar.
pub fn page(title: &str, body: &str) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!("<title>{}</title>\n", escape(title)));
    html.push_str("<style>\n");
    html.push_str(STYLE);
    html.push_str("</style>\n</head>\n<body>\n");
    html.push_str(
        "<nav><a href=\"/\">Home</a><a href=\"/scrape\">Scrape</a>\
         <a href=\"/table\">Table</a><a href=\"/bar\">Bar chart</a>\
         <a href=\"/pie\">Pie chart</a><a href=\"/export.csv\">Export CSV</a></nav>\n",
    );
    html.push_str(body);
    html.push_str("\n</body>\n</html>");
    html
}

/// The home page: endpoint overview plus links to the available catalogs.
pub fn home(catalogs: &[String]) -> String {
    let mut body = String::from("<h1>Listing Dashboard</h1>\n");
    body.push_str(
        "<p>Scrape the book listing, browse it as a table, chart it, or export it as CSV.</p>\n",
    );

    if !catalogs.is_empty() {
        body.push_str("<h2>Catalogs</h2>\n<ul>\n");
        for name in catalogs {
            body.push_str(&format!(
                "<li><a href=\"/catalog/{0}\">{0}</a> (<a href=\"/catalog/{0}/download\">download</a>)</li>\n",
                escape(name)
            ));
        }
        body.push_str("</ul>\n");
    }

    page("Listing Dashboard", &body)
}

/// The scraped listing rendered as a striped table.
pub fn listing_table(listing: &Listing, scraped_at: DateTime<Utc>) -> String {
    let mut body = String::from("<h1>Scraped Listing</h1>\n");
    body.push_str(&format!(
        "<p class=\"meta\">{} records, scraped at {}</p>\n",
        listing.len(),
        scraped_at.to_rfc3339()
    ));

    body.push_str("<table class=\"table table-striped\">\n<thead><tr>");
    body.push_str("<th>title</th><th>price</th><th>availability</th>");
    body.push_str("</tr></thead>\n<tbody>\n");
    for record in listing.iter() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape(&record.title),
            record.price,
            escape(&record.availability)
        ));
    }
    body.push_str("</tbody>\n</table>\n");

    page("Scraped Listing", &body)
}

/// A catalog CSV rendered verbatim as a striped table.
pub fn catalog_table(table: &CatalogTable) -> String {
    let mut body = format!("<h1>{}</h1>\n", escape(&table.name));
    body.push_str(&format!(
        "<p class=\"meta\">{} rows (<a href=\"/catalog/{}/download\">download</a>)</p>\n",
        table.rows.len(),
        escape(&table.name)
    ));

    body.push_str("<table class=\"table table-striped\">\n<thead><tr>");
    for header in &table.headers {
        body.push_str(&format!("<th>{}</th>", escape(header)));
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for row in &table.rows {
        body.push_str("<tr>");
        for cell in row {
            body.push_str(&format!("<td>{}</td>", escape(cell)));
        }
        body.push_str("</tr>\n");
    }
    body.push_str("</tbody>\n</table>\n");

    page(&table.name, &body)
}

/// A page embedding one generated chart image.
pub fn chart_page(heading: &str, img_src: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<img class=\"chart\" src=\"{}\" alt=\"{}\">\n",
        escape(heading),
        escape(img_src),
        escape(heading)
    );
    page(heading, &body)
}
