//! Response shapes
//!
//! Plain data types describing the `data` payload each operation returns. They carry no
//! behaviour; a call site pairs one with its error type as `Result<ResponseData, E>`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::name::{MutationName, OperationName, QueryName};

/// Binds a symbolic name to the variables it takes and the payload it returns
pub trait TypedOperation {
    const NAME: OperationName;
    type Variables: Serialize;
    type ResponseData: DeserializeOwned;
}

/// Marker for operations without variables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub amount_untaxed: Option<f64>,
    #[serde(default)]
    pub amount_tax: Option<f64>,
    #[serde(default)]
    pub amount_total: Option<f64>,
    #[serde(default)]
    pub order_lines: Option<Vec<OrderLine>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub id: i64,
    pub quantity: f64,
    #[serde(default)]
    pub price_subtotal: Option<f64>,
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub order: Option<Order>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductList {
    pub total_count: i64,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryList {
    pub total_count: i64,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryList {
    pub total_count: i64,
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: i64,
    #[serde(default)]
    pub product: Option<ProductSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistData {
    #[serde(default)]
    pub total_count: Option<i64>,
    pub wishlist_items: Vec<WishlistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponResult {
    pub error: Option<String>,
}

macro_rules! typed_operation {
    (
        $(#[$meta:meta])*
        $ty:ident = $name:expr,
        variables: $variables:ty,
        data: { $($field:ident : $field_ty:ty),+ $(,)? } as $data:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $ty;

        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $data {
            $(pub $field: $field_ty),+
        }

        impl TypedOperation for $ty {
            const NAME: OperationName = $name;
            type Variables = $variables;
            type ResponseData = $data;
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductVariables {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInput {
    pub id: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartAddItemVariables {
    pub products: Vec<ProductInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineInput {
    pub id: i64,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartUpdateItemVariables {
    pub lines: Vec<LineInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRemoveItemVariables {
    pub line_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplyCouponVariables {
    pub promo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginVariables {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterVariables {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistAddItemVariables {
    pub product_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRemoveItemVariables {
    pub wish_id: i64,
}

typed_operation! {
    LoadCart = OperationName::Query(QueryName::LoadCartQuery),
    variables: NoVariables,
    data: { cart: Cart } as LoadCartData
}

typed_operation! {
    LoadUser = OperationName::Query(QueryName::LoadUserQuery),
    variables: NoVariables,
    data: { partner: Option<Partner> } as LoadUserData
}

typed_operation! {
    GetProductTemplatesList = OperationName::Query(QueryName::GetProductTemplatesListQuery),
    variables: ProductListVariables,
    data: { products: ProductList } as ProductTemplatesListData
}

typed_operation! {
    GetProductTemplate = OperationName::Query(QueryName::GetProductTemplateQuery),
    variables: ProductVariables,
    data: { product: Option<Product> } as ProductTemplateData
}

typed_operation! {
    GetCategories = OperationName::Query(QueryName::GetCategoriesQuery),
    variables: NoVariables,
    data: { categories: CategoryList } as CategoriesData
}

typed_operation! {
    GetCountries = OperationName::Query(QueryName::GetCountriesQuery),
    variables: NoVariables,
    data: { countries: CountryList } as CountriesData
}

typed_operation! {
    GetWishlist = OperationName::Query(QueryName::GetWishlistQuery),
    variables: NoVariables,
    data: { wishlist_items: WishlistData } as WishlistItemsData
}

typed_operation! {
    CartAddItem = OperationName::Mutation(MutationName::CartAddItem),
    variables: CartAddItemVariables,
    data: { cart_add_multiple_items: Cart } as CartAddItemData
}

typed_operation! {
    CartUpdateItem = OperationName::Mutation(MutationName::CartUpdateItem),
    variables: CartUpdateItemVariables,
    data: { cart_update_multiple_items: Cart } as CartUpdateItemData
}

typed_operation! {
    /// `{ cartRemoveMultipleItems: { order: { id, name } } }`
    CartRemoveItem = OperationName::Mutation(MutationName::CartRemoveItem),
    variables: CartRemoveItemVariables,
    data: { cart_remove_multiple_items: Cart } as CartRemoveItemData
}

typed_operation! {
    ApplyCoupon = OperationName::Mutation(MutationName::ApplyCoupon),
    variables: ApplyCouponVariables,
    data: { apply_coupon: CouponResult } as ApplyCouponData
}

typed_operation! {
    Login = OperationName::Mutation(MutationName::Login),
    variables: LoginVariables,
    data: { login: Partner } as LoginData
}

typed_operation! {
    Logout = OperationName::Mutation(MutationName::Logout),
    variables: NoVariables,
    data: { logout: Option<bool> } as LogoutData
}

typed_operation! {
    Register = OperationName::Mutation(MutationName::Register),
    variables: RegisterVariables,
    data: { register: Partner } as RegisterData
}

typed_operation! {
    WishlistAddItem = OperationName::Mutation(MutationName::WishlistAddItem),
    variables: WishlistAddItemVariables,
    data: { wishlist_add_item: WishlistData } as WishlistAddItemData
}

typed_operation! {
    WishlistRemoveItem = OperationName::Mutation(MutationName::WishlistRemoveItem),
    variables: WishlistRemoveItemVariables,
    data: { wishlist_remove_item: WishlistData } as WishlistRemoveItemData
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::builtin::registry;

    #[test]
    fn cart_remove_item_payload_decodes() {
        let data: CartRemoveItemData = serde_json::from_value(json!({
            "cartRemoveMultipleItems": { "order": { "id": 12, "name": "S00012" } }
        }))
        .unwrap();

        let order = data.cart_remove_multiple_items.order.unwrap();
        assert_eq!(order.id, 12);
        assert_eq!(order.name, "S00012");
        assert_eq!(order.order_lines, None);
    }

    #[test]
    fn cart_remove_item_variables_use_graphql_names() {
        let variables = CartRemoveItemVariables {
            line_ids: vec![3, 7],
        };
        assert_eq!(
            serde_json::to_value(variables).unwrap(),
            json!({ "lineIds": [3, 7] })
        );
    }

    #[test]
    fn no_variables_serializes_to_an_empty_object() {
        assert_eq!(serde_json::to_value(NoVariables {}).unwrap(), json!({}));
    }

    #[test]
    fn load_cart_payload_decodes_lines() {
        let data: LoadCartData = serde_json::from_value(json!({
            "cart": {
                "order": {
                    "id": 1,
                    "name": "S00001",
                    "amountUntaxed": 10.0,
                    "amountTax": 1.5,
                    "amountTotal": 11.5,
                    "orderLines": [
                        {
                            "id": 3,
                            "quantity": 2.0,
                            "priceSubtotal": 10.0,
                            "product": { "id": 9, "name": "Desk", "slug": "desk-9" }
                        }
                    ]
                }
            }
        }))
        .unwrap();

        let order = data.cart.order.unwrap();
        assert_eq!(order.amount_total, Some(11.5));
        let lines = order.order_lines.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().unwrap().product.as_ref().unwrap().name, "Desk");
    }

    #[test]
    fn variables_match_the_declared_document_variables() {
        fn declared<O: TypedOperation>() -> Vec<String> {
            registry()
                .unwrap()
                .resolve(O::NAME)
                .unwrap()
                .variables()
                .into_iter()
                .map(|v| v.name)
                .collect()
        }

        assert_eq!(declared::<CartRemoveItem>(), vec!["lineIds"]);
        assert_eq!(declared::<Login>(), vec!["email", "password"]);
        assert!(declared::<LoadCart>().is_empty());

        let sent = serde_json::to_value(WishlistAddItemVariables { product_id: 4 }).unwrap();
        assert_eq!(
            sent.as_object().unwrap().keys().cloned().collect::<Vec<_>>(),
            declared::<WishlistAddItem>()
        );
    }
}
