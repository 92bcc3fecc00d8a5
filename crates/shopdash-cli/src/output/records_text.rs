use std::io;

use serde_json::Value;

use super::format::{
    Align, Column, array_field, i64_field, key_value_rows, render_table, short_timestamp,
    str_field, yen_field,
};

pub fn render_sale(command: &str, data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("{} {}", verb(command), str_field(data, "id"))];
    lines.extend(key_value_rows(
        &[
            ("Date:", short_timestamp(str_field(data, "date"))),
            ("Product:", str_field(data, "product_name").to_string()),
            ("Category:", str_field(data, "category").to_string()),
            ("Quantity:", i64_field(data, "quantity").to_string()),
            ("Amount:", yen_field(data, "amount")),
            ("Salesperson:", optional(data, "salesperson_name")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_sale_list(data: &Value) -> io::Result<String> {
    let sales = array_field(data, "sales");
    let mut lines = vec![list_heading("Sales", data)];
    if sales.is_empty() {
        lines.push("  No sales found.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        column("Id", Align::Left),
        column("Date", Align::Left),
        column("Product", Align::Left),
        column("Category", Align::Left),
        column("Qty", Align::Right),
        column("Amount", Align::Right),
        column("Salesperson", Align::Left),
    ];
    let rows = sales
        .iter()
        .map(|sale| {
            vec![
                str_field(sale, "id").to_string(),
                short_timestamp(str_field(sale, "date")),
                str_field(sale, "product_name").to_string(),
                str_field(sale, "category").to_string(),
                i64_field(sale, "quantity").to_string(),
                yen_field(sale, "amount"),
                optional(sale, "salesperson_name"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_purchase(command: &str, data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("{} {}", verb(command), str_field(data, "id"))];
    lines.extend(key_value_rows(
        &[
            ("Date:", short_timestamp(str_field(data, "date"))),
            ("Product:", str_field(data, "product_name").to_string()),
            ("Amount:", yen_field(data, "amount")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_purchase_list(data: &Value) -> io::Result<String> {
    let purchases = array_field(data, "purchases");
    let mut lines = vec![list_heading("Purchases", data)];
    if purchases.is_empty() {
        lines.push("  No purchases found.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        column("Id", Align::Left),
        column("Date", Align::Left),
        column("Product", Align::Left),
        column("Amount", Align::Right),
    ];
    let rows = purchases
        .iter()
        .map(|purchase| {
            vec![
                str_field(purchase, "id").to_string(),
                short_timestamp(str_field(purchase, "date")),
                str_field(purchase, "product_name").to_string(),
                yen_field(purchase, "amount"),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_product(command: &str, data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("{} {}", verb(command), str_field(data, "id"))];
    lines.extend(key_value_rows(
        &[
            ("Name:", str_field(data, "name").to_string()),
            ("Category:", str_field(data, "category").to_string()),
            ("Price:", yen_field(data, "price")),
            ("Stock:", str_field(data, "stock").to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_product_list(data: &Value) -> io::Result<String> {
    let products = array_field(data, "products");
    let mut lines = vec![format!(
        "Products{} ({})",
        search_suffix(data),
        i64_field(data, "count")
    )];
    if products.is_empty() {
        lines.push("  No products yet. Add one with `shopdash product add`.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        column("Id", Align::Left),
        column("Name", Align::Left),
        column("Category", Align::Left),
        column("Price", Align::Right),
        column("Stock", Align::Left),
    ];
    let rows = products
        .iter()
        .map(|product| {
            vec![
                str_field(product, "id").to_string(),
                str_field(product, "name").to_string(),
                str_field(product, "category").to_string(),
                yen_field(product, "price"),
                str_field(product, "stock").to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_salesperson(command: &str, data: &Value) -> io::Result<String> {
    let mut lines = vec![format!("{} {}", verb(command), str_field(data, "id"))];
    lines.extend(key_value_rows(
        &[
            ("Name:", str_field(data, "name").to_string()),
            ("Email:", optional(data, "email")),
            ("Phone:", optional(data, "phone")),
            ("Status:", status(data).to_string()),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

pub fn render_salesperson_list(data: &Value) -> io::Result<String> {
    let salespersons = array_field(data, "salespersons");
    let mut lines = vec![format!(
        "Salespersons{} ({})",
        search_suffix(data),
        i64_field(data, "count")
    )];
    if salespersons.is_empty() {
        lines.push("  No salespersons yet. Add one with `shopdash salesperson add`.".to_string());
        return Ok(lines.join("\n"));
    }

    let columns = [
        column("Id", Align::Left),
        column("Name", Align::Left),
        column("Email", Align::Left),
        column("Phone", Align::Left),
        column("Status", Align::Left),
    ];
    let rows = salespersons
        .iter()
        .map(|person| {
            vec![
                str_field(person, "id").to_string(),
                str_field(person, "name").to_string(),
                optional(person, "email"),
                optional(person, "phone"),
                status(person).to_string(),
            ]
        })
        .collect::<Vec<Vec<String>>>();
    lines.extend(render_table(&columns, &rows));
    Ok(lines.join("\n"))
}

pub fn render_removed(data: &Value) -> io::Result<String> {
    Ok(format!(
        "Removed {} {}",
        str_field(data, "kind"),
        str_field(data, "id")
    ))
}

pub fn render_targets(command: &str, data: &Value) -> io::Result<String> {
    let targets = data.get("targets").unwrap_or(&Value::Null);
    let heading = if command == "target set" {
        "Sales targets updated"
    } else {
        "Sales targets"
    };
    let mut lines = vec![heading.to_string()];
    lines.extend(key_value_rows(
        &[
            ("Daily:", yen_field(targets, "daily")),
            ("Weekly:", yen_field(targets, "weekly")),
            ("Monthly:", yen_field(targets, "monthly")),
            ("Yearly:", yen_field(targets, "yearly")),
        ],
        2,
    ));
    Ok(lines.join("\n"))
}

fn list_heading(noun: &str, data: &Value) -> String {
    let scope = match data.get("month").and_then(Value::as_str) {
        Some(month) => format!(" in {month}"),
        None => String::new(),
    };
    format!(
        "{noun}{scope}{}: {} totalling {}",
        search_suffix(data),
        i64_field(data, "count"),
        yen_field(data, "total_amount")
    )
}

fn search_suffix(data: &Value) -> String {
    match data.get("search").and_then(Value::as_str) {
        Some(term) => format!(" matching \"{term}\""),
        None => String::new(),
    }
}

fn verb(command: &str) -> &'static str {
    if command.ends_with(" update") {
        "Updated"
    } else {
        "Added"
    }
}

fn column(name: &str, align: Align) -> Column<'_> {
    Column { name, align }
}

fn optional(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("-")
        .to_string()
}

fn status(value: &Value) -> &'static str {
    if value.get("is_active").and_then(Value::as_bool).unwrap_or(false) {
        "active"
    } else {
        "inactive"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        render_product_list, render_removed, render_sale, render_sale_list, render_salesperson,
        render_targets,
    };

    #[test]
    fn sale_detail_shows_missing_salesperson_as_dash() {
        let data = json!({
            "id": "sale_01",
            "date": "2024-03-15T12:00:00",
            "product_name": "Oil",
            "category": "CBD",
            "quantity": 2,
            "amount": 9600,
            "salesperson_id": null,
            "salesperson_name": null
        });

        let rendered = render_sale("sale add", &data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Added sale_01"));
            assert!(text.contains("¥9,600"));
            assert!(text.contains("Salesperson:  -"));
        }
    }

    #[test]
    fn sale_list_heading_includes_month_and_total() {
        let data = json!({
            "month": "2024-03",
            "count": 0,
            "total_amount": 0,
            "sales": []
        });

        let rendered = render_sale_list(&data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Sales in 2024-03: 0 totalling ¥0"));
            assert!(text.contains("No sales found."));
        }
    }

    #[test]
    fn list_headings_echo_the_search_term() {
        let sales = render_sale_list(&json!({
            "month": null,
            "search": "oil",
            "count": 0,
            "total_amount": 0,
            "sales": []
        }));
        assert!(sales.is_ok());
        if let Ok(text) = sales {
            assert!(text.starts_with("Sales matching \"oil\": 0 totalling ¥0"));
        }

        let products = render_product_list(&json!({ "search": "balm", "count": 0, "products": [] }));
        assert!(products.is_ok());
        if let Ok(text) = products {
            assert!(text.starts_with("Products matching \"balm\" (0)"));
        }
    }

    #[test]
    fn salesperson_update_reports_status() {
        let data = json!({
            "id": "sp_01",
            "name": "Sato",
            "email": "sato@example.com",
            "phone": null,
            "is_active": false
        });

        let rendered = render_salesperson("salesperson update", &data);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Updated sp_01"));
            assert!(text.contains("inactive"));
            assert!(text.contains("sato@example.com"));
        }
    }

    #[test]
    fn targets_and_removals_render() {
        let targets = render_targets(
            "target set",
            &json!({ "targets": { "daily": 30000, "weekly": 150000, "monthly": 700000, "yearly": 8400000 } }),
        );
        assert!(targets.is_ok());
        if let Ok(text) = targets {
            assert!(text.starts_with("Sales targets updated"));
            assert!(text.contains("Yearly:   ¥8,400,000"));
        }

        let removed = render_removed(&json!({ "kind": "sale", "id": "sale_01" }));
        assert!(removed.is_ok());
        if let Ok(text) = removed {
            assert_eq!(text, "Removed sale sale_01");
        }
    }
}
