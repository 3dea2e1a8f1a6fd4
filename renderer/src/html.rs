//! HTML fragment construction for the breadth table.
//!
//! Every cell and message goes through [`escape`], so API data can
//! never inject markup into the page.

use crate::record::Record;

/// Header labels, in the order the seven record fields are rendered.
pub const HEADER_LABELS: [&str; 7] = [
    "Index Name",
    "Multiplier",
    "Timespan",
    "Declining",
    "Unchanged",
    "Advancing",
    "Timestamp",
];

/// Exact message shown when the endpoint returns an empty dataset.
pub const NO_DATA_MESSAGE: &str = "No data available.";

/// Wraps rendered content in the container element the page mounts.
pub fn container(inner: &str) -> String {
    format!(r#"<div class="table-container">{inner}</div>"#)
}

/// Renders the dataset: a table for records, the no-data message for none.
///
/// An empty dataset must not produce a `<table>` element at all.
pub fn render_dataset(records: &[Record]) -> String {
    if records.is_empty() {
        return format!("<p>{NO_DATA_MESSAGE}</p>");
    }

    let mut table = String::from(r#"<table class="data-table">"#);

    table.push_str("<tr>");
    for label in HEADER_LABELS {
        table.push_str("<th>");
        table.push_str(&escape(label));
        table.push_str("</th>");
    }
    table.push_str("</tr>");

    for record in records {
        table.push_str("<tr>");
        for cell in record.cells() {
            table.push_str("<td>");
            table.push_str(&escape(&cell));
            table.push_str("</td>");
        }
        table.push_str("</tr>");
    }

    table.push_str("</table>");
    table
}

/// Renders the failure state shown in place of the table.
pub fn render_error(description: &str) -> String {
    format!("<p>Error loading data: {}</p>", escape(description))
}

/// Minimal HTML text escaping for element content and attribute values.
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        serde_json::from_str(
            r#"{"index_name":"NIFTY50","multiplier":1,"timespan":"1D",
                "declining":10,"unchanged":2,"advancing":38,
                "timestamp":"2024-01-01T00:00:00Z"}"#,
        )
        .expect("sample record parses")
    }

    #[test]
    fn empty_dataset_renders_no_data_message_and_no_table() {
        let rendered = render_dataset(&[]);
        assert_eq!(rendered, "<p>No data available.</p>");
        assert!(!rendered.contains("<table"));
    }

    #[test]
    fn table_has_one_header_row_plus_one_row_per_record() {
        let records = vec![sample_record(), sample_record(), sample_record()];
        let rendered = render_dataset(&records);

        assert_eq!(rendered.matches("<tr>").count(), records.len() + 1);
        assert_eq!(rendered.matches("<th>").count(), 7);
        assert_eq!(rendered.matches("<td>").count(), records.len() * 7);
        assert!(rendered.starts_with(r#"<table class="data-table">"#));
    }

    #[test]
    fn header_labels_appear_in_order() {
        let rendered = render_dataset(&[sample_record()]);
        let expected = "<tr><th>Index Name</th><th>Multiplier</th><th>Timespan</th>\
                        <th>Declining</th><th>Unchanged</th><th>Advancing</th>\
                        <th>Timestamp</th></tr>"
            .replace(char::is_whitespace, "");
        assert!(rendered.replace(char::is_whitespace, "").contains(&expected));
    }

    #[test]
    fn sample_record_cells_render_in_field_order() {
        let rendered = render_dataset(&[sample_record()]);
        assert!(rendered.contains(
            "<tr><td>NIFTY50</td><td>1</td><td>1D</td><td>10</td>\
             <td>2</td><td>38</td><td>2024-01-01T00:00:00Z</td></tr>"
        ));
    }

    #[test]
    fn cell_text_is_escaped() {
        let record: Record = serde_json::from_str(r#"{"index_name":"<script>&"}"#)
            .expect("record with markup parses");
        let rendered = render_dataset(&[record]);
        assert!(rendered.contains("<td>&lt;script&gt;&amp;</td>"));
        assert!(!rendered.contains("<script>"));
    }

    #[test]
    fn error_rendering_embeds_escaped_description() {
        assert_eq!(
            render_error("HTTP error! Status: 500"),
            "<p>Error loading data: HTTP error! Status: 500</p>"
        );
        assert_eq!(
            render_error("bad < input"),
            "<p>Error loading data: bad &lt; input</p>"
        );
    }

    #[test]
    fn rendering_the_same_dataset_twice_is_identical() {
        let records = vec![sample_record(), sample_record()];
        assert_eq!(render_dataset(&records), render_dataset(&records));
    }
}
