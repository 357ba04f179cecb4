//! Browsing commands: products and logo designs.

use stitchhouse_api::{Applied, DesignSort, LogoDesignFilters};
use stitchhouse_core::{CatalogItem, Price};
use stitchhouse_storefront::{LogoDesignPage, ProductCatalog};

use super::{App, CliError};

/// List products, one page of eight unless `all` is set.
pub async fn products(app: &mut App, limit: u32, all: bool) -> Result<(), CliError> {
    let mut catalog = ProductCatalog::new(limit);
    let applied = catalog.load(&app.api, &mut app.notices).await;
    app.flush_notices();
    if applied == Applied::Cleared {
        return Err(CliError::Usage("Failed to load products".to_string()));
    }

    while all && catalog.has_more() {
        catalog.show_more();
    }
    print_items(catalog.visible());
    if catalog.has_more() {
        print_more(catalog.all().len() - catalog.visible().len());
    }
    Ok(())
}

pub struct DesignQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub industry: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub sort: Option<DesignSort>,
}

/// List logo designs matching `query`.
pub async fn designs(app: &mut App, query: DesignQuery) -> Result<(), CliError> {
    let mut page = LogoDesignPage::new();
    let pending = page.set_filters(LogoDesignFilters {
        search: query.search.unwrap_or_default(),
        category: query.category,
        industry: query.industry,
        min_price: query.min_price,
        max_price: query.max_price,
        sort_by: query.sort,
    });
    let applied = page.fetch(pending, &app.api, &mut app.notices).await;
    app.flush_notices();
    if applied == Applied::Cleared {
        return Err(CliError::Usage("Failed to load logo designs".to_string()));
    }

    while page.has_more() {
        page.show_more();
    }
    print_items(page.designs());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_items(items: &[CatalogItem]) {
    if items.is_empty() {
        println!("No results.");
        return;
    }
    for item in items {
        let category = item.category.as_deref().unwrap_or("-");
        println!(
            "{:<26} {:>10}  {:<14} {}",
            item.id.as_str(),
            item.price.to_string(),
            category,
            item.title
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_more(hidden: usize) {
    println!("... {hidden} more (use --all)");
}
