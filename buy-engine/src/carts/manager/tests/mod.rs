use super::*;
use crate::catalog::{MemorySaleCatalog, SaleLookupError};
use async_trait::async_trait;
use shared::models::Sale;


fn test_config() -> EngineConfig {
    EngineConfig { tax_rate: 10 }
}

fn test_product(product_id: i64) -> ProductSummary {
    ProductSummary {
        product_id,
        display_name: format!("Product {}", product_id),
        image_url: String::new(),
        condition_name: "NM".to_string(),
        is_buy_only: None,
        stock_number: 10,
        dont_adjust_stock_number: false,
        infinite_stock: false,
        original_purchase_price: Some(1000),
        original_specific_purchase_price: None,
        management_number: None,
    }
}

fn test_sale(id: i64, discount_amount: Option<&str>, allowed_item_count: i32) -> Sale {
    Sale {
        id,
        display_name: format!("Sale {}", id),
        discount_amount: discount_amount.map(str::to_owned),
        allowed_item_count,
    }
}

fn manager_with_sales(entries: Vec<(i64, Sale)>) -> CartManager {
    let mut catalog = MemorySaleCatalog::new();
    for (product_id, sale) in entries {
        catalog.add_sale(product_id, sale);
    }
    CartManager::new(Arc::new(catalog), test_config())
}

fn empty_manager() -> CartManager {
    manager_with_sales(Vec::new())
}

fn add_input(product_id: i64, item_count: i32, unit_price: i64) -> AddProductsInput {
    AddProductsInput {
        product: test_product(product_id),
        item_count,
        unit_price,
        discount_price: None,
        is_unique: false,
    }
}

/// Catalog that always fails, for degraded-lookup tests
struct FailingCatalog;

#[async_trait]
impl SaleLookup for FailingCatalog {
    async fn applicable_sales(
        &self,
        _product_id: i64,
        _kind: TransactionKind,
    ) -> Result<Vec<Sale>, SaleLookupError> {
        Err(SaleLookupError("catalog unreachable".to_string()))
    }
}
