use mystara_client::core::{ApiError, AppError, AppState};
use mystara_client::market::types::{
    ApprovedRequestItem, NewPayment, NewPurchaseRequest, PaymentStatus, Product, ProductInput,
    Registration, ThemeInput,
};
use mystara_client::market::ApiResponse;
use mystara_client::Role;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::info;

pub async fn login(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let is_buyer = role_arg(args)?;
    let email = arg(args, 1, "EMAIL")?;
    let password = arg(args, 2, "PASSWORD")?;

    let resp = state.client.auth().login(is_buyer, email, password).await?;
    print_json(&resp.data)
}

pub async fn register(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let is_buyer = role_arg(args)?;
    let registration = Registration {
        email: arg(args, 1, "EMAIL")?.to_string(),
        password: arg(args, 2, "PASSWORD")?.to_string(),
        name: arg(args, 3, "NAME")?.to_string(),
        phone: flag(args, "--phone"),
        address: flag(args, "--address"),
        business_name: flag(args, "--business-name"),
    };

    let resp = state.client.auth().register(is_buyer, &registration).await?;
    print_json(&resp.data)
}

pub fn logout(state: &AppState) -> Result<(), AppError> {
    state.client.auth().logout();
    info!("logged out");
    Ok(())
}

pub fn whoami(state: &AppState) -> Result<(), AppError> {
    match state.client.auth().current_session() {
        Some(session) => print_json(&json!({
            "userId": session.user_id,
            "role": session.role,
            "user": session.profile,
        })),
        None => Err(ApiError::NoSession.into()),
    }
}

pub async fn themes(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let themes = state.client.themes();
    match action(args)? {
        "list" => print_data(themes.list().await?),
        "get" => print_data(themes.get(arg(args, 1, "ID")?).await?),
        "create" => {
            let input = theme_input(args, 1)?;
            print_data(themes.create(&input).await?)
        }
        "update" => {
            let id = arg(args, 1, "ID")?;
            let input = theme_input(args, 2)?;
            print_data(themes.update(id, &input).await?)
        }
        "delete" => print_status(themes.delete(arg(args, 1, "ID")?).await?),
        other => Err(unknown_action("themes", other)),
    }
}

pub async fn products(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let products = state.client.products();
    match action(args)? {
        "list" => {
            let listed = match flag(args, "--theme") {
                Some(theme_id) => products.list_by_theme(&theme_id).await?,
                None => products.list().await?,
            };
            if switch(args, "--mine") {
                let seller_id = state.client.session().ok_or(ApiError::NoSession)?.user_id;
                print_json(&sold_by(&listed.data, &seller_id))
            } else {
                print_data(listed)
            }
        }
        "get" => print_data(products.get(arg(args, 1, "ID")?).await?),
        "create" => {
            let input = owned_by_seller(state, json_arg(args, 1, "JSON")?);
            print_data(products.create(&input).await?)
        }
        "update" => {
            let id = arg(args, 1, "ID")?;
            let input = owned_by_seller(state, json_arg(args, 2, "JSON")?);
            print_data(products.update(id, &input).await?)
        }
        "delete" => print_status(products.delete(arg(args, 1, "ID")?).await?),
        "stock" => {
            let id = arg(args, 1, "ID")?;
            let stock: i64 = parse_arg(args, 2, "STOCK")?;
            if stock < 0 {
                return Err(AppError::Usage("STOCK must not be negative".into()));
            }
            print_data(products.update_stock(id, stock).await?)
        }
        other => Err(unknown_action("products", other)),
    }
}

pub async fn requests(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let requests = state.client.requests();
    match action(args)? {
        "create" => {
            let request = NewPurchaseRequest {
                product_id: arg(args, 1, "PRODUCT_ID")?.to_string(),
                quantity: quantity_arg(args, 2)?,
                message: flag(args, "--message"),
            };
            print_data(requests.create(&request).await?)
        }
        "mine" => print_data(requests.list_mine().await?),
        "pending" => print_data(requests.list_pending().await?),
        "approved" => print_data(requests.list_approved().await?),
        "cancel" => print_status(requests.cancel(arg(args, 1, "ID")?).await?),
        "incoming" => print_data(requests.list_for_seller().await?),
        "approve" => print_data(requests.approve(arg(args, 1, "ID")?).await?),
        "reject" => {
            let id = arg(args, 1, "ID")?;
            let reason = flag(args, "--reason");
            print_data(requests.reject(id, reason.as_deref()).await?)
        }
        other => Err(unknown_action("requests", other)),
    }
}

pub async fn cart(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let cart = state.client.cart();
    match action(args)? {
        "show" => print_data(cart.get().await?),
        "add" => {
            let request_id = arg(args, 1, "REQUEST_ID")?;
            let approved = state.client.requests().list_approved().await?.into_data();
            let request = approved
                .iter()
                .find(|r| r.id == request_id)
                .ok_or_else(|| {
                    AppError::Precondition(format!("No approved request with id {request_id}"))
                })?;
            print_data(
                cart.add_approved_request(&ApprovedRequestItem::from(request))
                    .await?,
            )
        }
        "update" => {
            let product_id = arg(args, 1, "PRODUCT_ID")?;
            let quantity = quantity_arg(args, 2)?;
            print_data(cart.update_item(product_id, quantity).await?)
        }
        "remove" => print_data(cart.remove_item(arg(args, 1, "PRODUCT_ID")?).await?),
        "clear" => print_status(cart.clear().await?),
        other => Err(unknown_action("cart", other)),
    }
}

pub async fn payments(state: &AppState, args: &[String]) -> Result<(), AppError> {
    let payments = state.client.payments();
    match action(args)? {
        "checkout" => {
            let session = state.client.session().ok_or(ApiError::NoSession)?;
            let cart = state.client.cart().get().await?.into_data();
            let new_payment = NewPayment::from_cart(&cart, session.user_id, &state.config.currency);
            if cart.is_empty() || new_payment.amount <= 0.0 {
                return Err(AppError::Precondition("Your cart is empty".into()));
            }

            let payment = payments.create(&new_payment).await?.into_data();
            if payment.status == PaymentStatus::Failed {
                return Err(AppError::Precondition(
                    payment
                        .error_message
                        .unwrap_or_else(|| "Failed to create payment order".into()),
                ));
            }
            info!(
                payment_id = %payment.id,
                order_id = payment.razorpay_order_id.as_deref().unwrap_or(""),
                amount = payment.amount,
                "payment order created; complete it with the provider, then confirm"
            );
            print_json(&payment)
        }
        "confirm" => {
            let payment_id = arg(args, 1, "PAYMENT_ID")?;
            let provider_id = arg(args, 2, "RAZORPAY_PAYMENT_ID")?;
            let payment = payments.confirm(payment_id, provider_id).await?.into_data();
            if payment.status != PaymentStatus::Success {
                return Err(AppError::Precondition(
                    payment
                        .error_message
                        .unwrap_or_else(|| "Payment failed on server".into()),
                ));
            }
            state.client.cart().clear().await?;
            print_json(&payment)
        }
        "list" => print_data(payments.list_mine().await?),
        "get" => print_data(payments.get(arg(args, 1, "ID")?).await?),
        other => Err(unknown_action("payments", other)),
    }
}

fn theme_input(args: &[String], name_at: usize) -> Result<ThemeInput, AppError> {
    Ok(ThemeInput {
        name: arg(args, name_at, "NAME")?.to_string(),
        description: flag(args, "--description"),
        category: flag(args, "--category"),
    })
}

fn sold_by<'a>(products: &'a [Product], seller_id: &str) -> Vec<&'a Product> {
    products.iter().filter(|p| p.seller_id == seller_id).collect()
}

/// Products a seller writes belong to that seller unless the JSON names one.
fn owned_by_seller(state: &AppState, mut input: ProductInput) -> ProductInput {
    if input.seller_id.is_none() {
        input.seller_id = state
            .client
            .session()
            .filter(|s| s.role == Role::Seller)
            .map(|s| s.user_id);
    }
    input
}

fn role_arg(args: &[String]) -> Result<bool, AppError> {
    let role: Role = arg(args, 0, "ROLE")?
        .parse()
        .map_err(|e: AppError| AppError::Usage(e.to_string()))?;
    Ok(role.is_buyer())
}

fn action(args: &[String]) -> Result<&str, AppError> {
    arg(args, 0, "ACTION")
}

/// Flags that take no value.
const SWITCHES: &[&str] = &["--mine"];

/// Positional argument `i`, skipping `--flag value` pairs.
fn arg<'a>(args: &'a [String], i: usize, name: &str) -> Result<&'a str, AppError> {
    positionals(args)
        .nth(i)
        .ok_or_else(|| AppError::Usage(format!("Missing {name}")))
}

fn positionals(args: &[String]) -> impl Iterator<Item = &str> {
    let mut skip_next = false;
    args.iter().filter_map(move |a| {
        if skip_next {
            skip_next = false;
            return None;
        }
        if a.starts_with("--") {
            skip_next = !SWITCHES.contains(&a.as_str());
            return None;
        }
        Some(a.as_str())
    })
}

fn switch(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn flag(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, name: &str) -> Result<T, AppError> {
    let raw = arg(args, i, name)?;
    raw.parse()
        .map_err(|_| AppError::Usage(format!("{name} is not a valid number: {raw}")))
}

fn quantity_arg(args: &[String], i: usize) -> Result<u32, AppError> {
    let quantity: u32 = parse_arg(args, i, "QUANTITY")?;
    if quantity == 0 {
        return Err(AppError::Usage("QUANTITY must be at least 1".into()));
    }
    Ok(quantity)
}

fn json_arg<T: DeserializeOwned>(args: &[String], i: usize, name: &str) -> Result<T, AppError> {
    serde_json::from_str(arg(args, i, name)?)
        .map_err(|e| AppError::Usage(format!("{name} is not valid: {e}")))
}

fn unknown_action(group: &str, action: &str) -> AppError {
    AppError::Usage(format!("Unknown {group} action: {action}"))
}

fn print_data<T: Serialize>(resp: ApiResponse<T>) -> Result<(), AppError> {
    print_json(&resp.data)
}

fn print_status(resp: ApiResponse<()>) -> Result<(), AppError> {
    print_json(&json!({"status": resp.status.as_u16()}))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use mystara_client::core::ClientConfig;
    use mystara_client::market::MarketClient;
    use mystara_client::session::Profile;
    use mystara_client::{MemorySessionStore, Session};
    use std::sync::Arc;

    fn seller_state(base_url: &str) -> AppState {
        let config = ClientConfig::with_base_url(base_url).unwrap();
        let session = Session::new(
            "tok-seller",
            Role::Seller,
            Profile {
                id: "s1".into(),
                email: None,
                name: Some("Shop".into()),
                extra: Default::default(),
            },
        );
        let store = Arc::new(MemorySessionStore::with_session(session));
        AppState {
            client: MarketClient::new(&config, store).unwrap(),
            config: Arc::new(config),
        }
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn positionals_skip_flag_values() {
        let a = args(&["create", "p1", "--message", "hello there", "2"]);
        assert_eq!(arg(&a, 0, "ACTION").unwrap(), "create");
        assert_eq!(arg(&a, 1, "PRODUCT_ID").unwrap(), "p1");
        assert_eq!(arg(&a, 2, "QUANTITY").unwrap(), "2");
        assert_eq!(flag(&a, "--message").as_deref(), Some("hello there"));
        assert!(arg(&a, 3, "EXTRA").is_err());
    }

    #[test]
    fn quantity_must_be_positive() {
        assert_eq!(quantity_arg(&args(&["x", "y", "3"]), 2).unwrap(), 3);
        assert!(matches!(
            quantity_arg(&args(&["x", "y", "0"]), 2),
            Err(AppError::Usage(_))
        ));
        assert!(matches!(
            quantity_arg(&args(&["x", "y", "-1"]), 2),
            Err(AppError::Usage(_))
        ));
    }

    #[test]
    fn role_argument() {
        assert!(role_arg(&args(&["Buyer"])).unwrap());
        assert!(!role_arg(&args(&["seller"])).unwrap());
        assert!(matches!(role_arg(&args(&["admin"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn switches_do_not_swallow_positionals() {
        let a = args(&["list", "--mine", "extra"]);
        assert!(switch(&a, "--mine"));
        assert_eq!(arg(&a, 1, "EXTRA").unwrap(), "extra");
    }

    #[tokio::test]
    async fn seller_product_writes_carry_own_seller_id() {
        let server = MockServer::start_async().await;
        let create = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/products")
                    .json_body_partial(r#"{"sellerId":"s1"}"#);
                then.status(201).json_body(serde_json::json!({
                    "id": "p1", "sellerId": "s1", "themeId": "t1", "name": "Mug",
                    "price": 1.0, "stock": 1
                }));
            })
            .await;
        let update = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/products/p2")
                    .json_body_partial(r#"{"sellerId":"s9"}"#);
                then.status(200).json_body(serde_json::json!({
                    "id": "p2", "sellerId": "s9", "themeId": "t1", "name": "Cup",
                    "price": 2.0, "stock": 1
                }));
            })
            .await;
        let state = seller_state(&server.base_url());

        products(
            &state,
            &args(&["create", r#"{"themeId":"t1","name":"Mug","price":1.0,"stock":1}"#]),
        )
        .await
        .unwrap();
        products(
            &state,
            &args(&[
                "update",
                "p2",
                r#"{"sellerId":"s9","themeId":"t1","name":"Cup","price":2.0,"stock":1}"#,
            ]),
        )
        .await
        .unwrap();

        create.assert_async().await;
        update.assert_async().await;
    }

    #[tokio::test]
    async fn mine_listing_needs_a_session() {
        let server = MockServer::start_async().await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/api/products");
                then.status(200).json_body(serde_json::json!([
                    {"id": "p1", "sellerId": "s1", "themeId": "t1", "name": "Mug"},
                    {"id": "p2", "sellerId": "s2", "themeId": "t1", "name": "Cup"}
                ]));
            })
            .await;
        let state = seller_state(&server.base_url());

        products(&state, &args(&["list", "--mine"])).await.unwrap();
        list.assert_async().await;

        state.client.auth().logout();
        assert!(matches!(
            products(&state, &args(&["list", "--mine"])).await,
            Err(AppError::Api(ApiError::NoSession))
        ));
    }

    #[test]
    fn seller_id_fills_only_when_absent() {
        let state = seller_state("http://localhost:8089");
        let filled = owned_by_seller(&state, ProductInput::default());
        assert_eq!(filled.seller_id.as_deref(), Some("s1"));

        let named = owned_by_seller(
            &state,
            ProductInput {
                seller_id: Some("s9".into()),
                ..Default::default()
            },
        );
        assert_eq!(named.seller_id.as_deref(), Some("s9"));

        state.client.auth().logout();
        assert!(owned_by_seller(&state, ProductInput::default())
            .seller_id
            .is_none());
    }

    #[test]
    fn mine_filter_keeps_only_own_products() {
        let listed: Vec<Product> = serde_json::from_value(serde_json::json!([
            {"id": "p1", "sellerId": "s1"},
            {"id": "p2", "sellerId": "s2"},
            {"id": "p3", "sellerId": "s1"}
        ]))
        .unwrap();
        let mine: Vec<&str> = sold_by(&listed, "s1")
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(mine, ["p1", "p3"]);
    }
}
