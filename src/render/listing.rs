use crate::domain::model::SearchResult;

pub fn render_listing(result: &SearchResult) -> String {
    let mut out = format!("{} stores found\n\n", result.len());
    for store in &result.stores {
        out.push_str(&store.to_string());
        out.push_str("\n\n");
    }
    out
}
