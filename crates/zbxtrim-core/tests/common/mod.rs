use zbxtrim_core::{ItemRecord, TemplateRecord};

pub fn stock_item(id: &str) -> ItemRecord {
    ItemRecord::new(id, format!("Item {id}"), "31d", "365d").with_key(format!("key.{id}"))
}

pub fn template_with_stock_items(id: &str, count: usize) -> TemplateRecord {
    let items = (0..count)
        .map(|i| stock_item(&format!("{id}-{i}")))
        .collect();
    TemplateRecord::new(id, format!("Template {id}")).with_items(items)
}
