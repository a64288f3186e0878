use crate::stock_api::AnalysisResult;

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn list(items: &[String]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{}</ul>", items)
}

const FORM: &str = r#"<form method="post">
  Call OI change: <input type="number" name="buy_oi"><br>
  Put OI change: <input type="number" name="sell_oi"><br>
  P/C Ratio: <input type="text" name="pc_ratio"><br>
  Foreign net call position: <input type="number" name="foreign_buy"><br>
  <input type="submit" value="Analyze">
</form>"#;

pub fn render_page(symbol: &str, result: Option<&AnalysisResult>) -> String {
    let mut html = format!(
        "<!doctype html>\n<title>{symbol} analysis</title>\n<h2>{symbol} option chips + technical analysis</h2>\n{FORM}\n",
        symbol = escape(symbol),
    );

    if let Some(result) = result {
        html.push_str("<h3>Chip analysis</h3>\n");
        html.push_str(&list(&result.chips));
        html.push_str(&format!("\n<p><b>{}</b></p>\n", escape(&result.chips_final)));

        html.push_str("<h3>Technical analysis</h3>\n");
        html.push_str(&list(&result.tech));

        html.push_str("\n<h3>Intraday support / resistance</h3>\n");
        html.push_str(&format!("<p>{}</p>\n", escape(&result.sr)));
    }

    html
}
