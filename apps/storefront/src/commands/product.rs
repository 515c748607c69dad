//! # Product Commands
//!
//! Catalog browsing and product maintenance.
//!
//! ## Views and Calls
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View              Command                  Catalog call                │
//! │  ────              ───────                  ────────────                │
//! │  Catalog list      list_products()          GET    /products            │
//! │  Product detail    get_product()            GET    /products/{id}       │
//! │  Add form          create_product()         POST   /products            │
//! │  Edit form (load)  load_product_form()      GET    /products/{id}       │
//! │  Edit form (save)  update_product()         PUT    /products/{id}       │
//! │  Detail (delete)   delete_product()         DELETE /products/{id}       │
//! │                                                                         │
//! │  Forms are validated before any call; an invalid form is never sent.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use storefront_core::{Product, ProductForm, ProductId};

use crate::error::{ApiError, CatalogOperation};
use crate::state::CatalogState;

fn parse_id(product_id: &str) -> Result<ProductId, ApiError> {
    Ok(product_id.parse::<ProductId>()?)
}

/// Lists every product in the catalog.
pub async fn list_products(catalog: &CatalogState) -> Result<Vec<Product>, ApiError> {
    debug!("list_products command");

    catalog
        .client()
        .list_products()
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::ListProducts, e))
}

/// Fetches one product for the detail view.
pub async fn get_product(catalog: &CatalogState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "get_product command");
    let id = parse_id(product_id)?;

    catalog
        .client()
        .get_product(id)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::ProductDetails, e))
}

/// Submits the add form.
///
/// ## Returns
/// The service's echo of the new product. The demo service does not keep
/// it, so the id cannot be fetched afterwards.
pub async fn create_product(catalog: &CatalogState, form: ProductForm) -> Result<Product, ApiError> {
    debug!(title = %form.title, "create_product command");
    let draft = form.into_draft()?;

    let created = catalog
        .client()
        .create_product(draft)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::CreateProduct, e))?;

    info!(id = %created.id, "Product added");
    Ok(created)
}

/// Loads a product and pre-fills the edit form with it.
pub async fn load_product_form(
    catalog: &CatalogState,
    product_id: &str,
) -> Result<ProductForm, ApiError> {
    debug!(product_id = %product_id, "load_product_form command");
    let id = parse_id(product_id)?;

    let product = catalog
        .client()
        .get_product(id)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::LoadForEdit, e))?;

    Ok(ProductForm::from(&product))
}

/// Submits the edit form.
pub async fn update_product(
    catalog: &CatalogState,
    product_id: &str,
    form: ProductForm,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "update_product command");
    let id = parse_id(product_id)?;
    let draft = form.into_draft()?;

    let updated = catalog
        .client()
        .update_product(id, draft)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::UpdateProduct, e))?;

    info!(%id, "Product updated");
    Ok(updated)
}

/// Deletes a product.
pub async fn delete_product(catalog: &CatalogState, product_id: &str) -> Result<(), ApiError> {
    debug!(product_id = %product_id, "delete_product command");
    let id = parse_id(product_id)?;

    catalog
        .client()
        .delete_product(id)
        .await
        .map_err(|e| ApiError::catalog(CatalogOperation::DeleteProduct, e))?;

    info!(%id, "Product deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use mockall::predicate::eq;
    use storefront_catalog::{CatalogError, MockCatalogClient};
    use storefront_core::{Money, PLACEHOLDER_IMAGE_URL};

    fn product(id: u64, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {}", id),
            price: Money::from_cents(cents),
            description: "A thing".to_string(),
            category: "electronics".to_string(),
            image: "https://fakestoreapi.com/img/1.jpg".to_string(),
        }
    }

    fn filled_form() -> ProductForm {
        ProductForm {
            title: " Desk Lamp ".to_string(),
            price: "19.99".to_string(),
            description: "Warm light".to_string(),
            category: "home".to_string(),
        }
    }

    fn unavailable() -> CatalogError {
        CatalogError::Transport("connection refused".to_string())
    }

    #[tokio::test]
    async fn test_list_products() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list_products()
            .times(1)
            .returning(|| Ok(vec![product(1, 999), product(2, 500)]));

        let catalog = CatalogState::from_client(mock);
        let products = list_products(&catalog).await.unwrap();
        assert_eq!(products.len(), 2);
    }

    #[tokio::test]
    async fn test_list_failure_message() {
        let mut mock = MockCatalogClient::new();
        mock.expect_list_products().returning(|| Err(unavailable()));

        let err = list_products(&CatalogState::from_client(mock)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RemoteError);
        assert_eq!(err.message, "Failed to fetch products: Request failed: connection refused");
    }

    #[tokio::test]
    async fn test_get_product_not_found() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_product()
            .with(eq(ProductId::new(42)))
            .returning(|id| Err(CatalogError::NotFound(id)));

        let err = get_product(&CatalogState::from_client(mock), "42").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.message, "Failed to fetch product details.");
    }

    #[tokio::test]
    async fn test_malformed_id_makes_no_call() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_product().never();
        mock.expect_delete_product().never();
        let catalog = CatalogState::from_client(mock);

        let err = get_product(&catalog, "abc").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = delete_product(&catalog, "-3").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_create_sends_trimmed_draft_with_placeholder() {
        let mut mock = MockCatalogClient::new();
        mock.expect_create_product()
            .withf(|draft| {
                draft.title == "Desk Lamp"
                    && draft.price == Money::from_cents(1999)
                    && draft.image == PLACEHOLDER_IMAGE_URL
            })
            .times(1)
            .returning(|draft| Ok(draft.into_product(ProductId::new(21))));

        let created = create_product(&CatalogState::from_client(mock), filled_form())
            .await
            .unwrap();
        assert_eq!(created.id, ProductId::new(21));
    }

    #[tokio::test]
    async fn test_invalid_form_is_never_sent() {
        let mut mock = MockCatalogClient::new();
        mock.expect_create_product().never();

        let mut form = filled_form();
        form.category = "   ".to_string();

        let err = create_product(&CatalogState::from_client(mock), form)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Please fill in all fields.");
    }

    #[tokio::test]
    async fn test_create_failure_message() {
        let mut mock = MockCatalogClient::new();
        mock.expect_create_product().returning(|_| Err(unavailable()));

        let err = create_product(&CatalogState::from_client(mock), filled_form())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Something went wrong. Please try again.");
    }

    #[tokio::test]
    async fn test_load_form_prefills_fields() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_product()
            .with(eq(ProductId::new(3)))
            .returning(|id| Ok(product(id.get(), 5500)));

        let form = load_product_form(&CatalogState::from_client(mock), "3")
            .await
            .unwrap();
        assert_eq!(form.title, "Product 3");
        assert_eq!(form.price, "55.00");
    }

    #[tokio::test]
    async fn test_load_form_failure_message() {
        let mut mock = MockCatalogClient::new();
        mock.expect_get_product().returning(|_| Err(unavailable()));

        let err = load_product_form(&CatalogState::from_client(mock), "3")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to load product details.");
    }

    #[tokio::test]
    async fn test_update_and_failure() {
        let mut mock = MockCatalogClient::new();
        mock.expect_update_product()
            .withf(|id, draft| *id == ProductId::new(5) && draft.category == "home")
            .times(1)
            .returning(|id, draft| Ok(draft.into_product(id)));
        let catalog = CatalogState::from_client(mock);

        let updated = update_product(&catalog, "5", filled_form()).await.unwrap();
        assert_eq!(updated.id, ProductId::new(5));

        let mut mock = MockCatalogClient::new();
        mock.expect_update_product().returning(|_, _| Err(unavailable()));
        let err = update_product(&CatalogState::from_client(mock), "5", filled_form())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to update product.");
    }

    #[tokio::test]
    async fn test_delete_and_failure() {
        let mut mock = MockCatalogClient::new();
        mock.expect_delete_product()
            .with(eq(ProductId::new(1)))
            .times(1)
            .returning(|_| Ok(()));
        assert!(delete_product(&CatalogState::from_client(mock), "1").await.is_ok());

        let mut mock = MockCatalogClient::new();
        mock.expect_delete_product().returning(|_| Err(unavailable()));
        let err = delete_product(&CatalogState::from_client(mock), "1")
            .await
            .unwrap_err();
        assert_eq!(err.message, "Failed to delete product.");
    }
}
