//! # Cart Client
//!
//! The caller-facing cart API. It wraps a `ResourceClient<Cart>` bound to one cart id and
//! exposes the three mutations plus a snapshot accessor.
//!
//! Every operation returns a `Result` whose error is the [`CartError`] the actor produced.
//! On failure the client also pushes a [`Notice`] to its [`Notifier`]; callers that only
//! need the user-facing message can ignore the error value.
use crate::cart_actor::{CartAction, CartActionResult, CartError};
use crate::model::{AmountUpdate, Cart, CartId, CartItem, ProductId};
use crate::notify::{CartOperation, Notice, Notifier};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
    cart_id: CartId,
    notifier: Arc<dyn Notifier>,
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into_entity_error::<CartError>()
            .unwrap_or_else(|other| CartError::ActorCommunication(other.to_string()))
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>, cart_id: CartId, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            inner,
            cart_id,
            notifier,
        }
    }

    pub fn cart_id(&self) -> &CartId {
        &self.cart_id
    }

    /// Snapshot of the cart. Opens it (reads durable storage) if nobody has yet.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn cart(&self) -> Result<Cart, CartError> {
        match self.get(self.cart_id.clone()).await? {
            Some(cart) => Ok(cart),
            None => self.open(self.cart_id.clone()).await,
        }
    }

    /// Adds one unit of `product_id` to the cart.
    ///
    /// Returns the line as it is after the change.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn add_product(&self, product_id: ProductId) -> Result<CartItem, CartError> {
        debug!("Sending request");
        match self
            .perform(CartOperation::AddProduct, CartAction::AddProduct(product_id))
            .await?
        {
            CartActionResult::AddProduct(item) => Ok(item),
            _ => unreachable!("AddProduct action must return AddProduct result"),
        }
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns the removed line.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn remove_product(&self, product_id: ProductId) -> Result<CartItem, CartError> {
        debug!("Sending request");
        match self
            .perform(
                CartOperation::RemoveProduct,
                CartAction::RemoveProduct(product_id),
            )
            .await?
        {
            CartActionResult::RemoveProduct(item) => Ok(item),
            _ => unreachable!("RemoveProduct action must return RemoveProduct result"),
        }
    }

    /// Sets the amount of an existing line to `update.amount`.
    #[instrument(skip(self), fields(cart_id = %self.cart_id))]
    pub async fn update_product_amount(&self, update: AmountUpdate) -> Result<CartItem, CartError> {
        debug!("Sending request");
        match self
            .perform(
                CartOperation::UpdateProductAmount,
                CartAction::UpdateProductAmount(update),
            )
            .await?
        {
            CartActionResult::UpdateProductAmount(item) => Ok(item),
            _ => unreachable!("UpdateProductAmount action must return UpdateProductAmount result"),
        }
    }

    async fn perform(
        &self,
        operation: CartOperation,
        action: CartAction,
    ) -> Result<CartActionResult, CartError> {
        let result = self
            .inner
            .perform_action(self.cart_id.clone(), action)
            .await
            .map_err(Self::map_error);

        if let Err(e) = &result {
            debug!(%operation, error = %e, "Rejected");
            self.notifier.notify(Notice::for_failure(operation, e));
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Product;
    use crate::notify::{MemoryNotifier, ADD_FAILED, OUT_OF_STOCK, REMOVE_FAILED, UPDATE_FAILED};
    use crate::sources::SourceError;
    use actor_framework::mock::{
        create_mock_client, expect_action, expect_get, expect_open, MockClient,
    };

    fn cart_id() -> CartId {
        CartId::namespaced("@test")
    }

    fn shoe_line(amount: u32) -> CartItem {
        CartItem::new(Product::new(ProductId(1), "Shoe", 100.0, ""), amount)
    }

    #[tokio::test]
    async fn test_add_product_returns_line() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let notifier = Arc::new(MemoryNotifier::new());
        let cart_client = CartClient::new(client, cart_id(), notifier.clone());

        let task = tokio::spawn(async move { cart_client.add_product(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, cart_id());
        assert!(matches!(action, CartAction::AddProduct(ProductId(1))));
        responder
            .send(Ok(CartActionResult::AddProduct(shoe_line(1))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), shoe_line(1));
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn test_entity_error_is_recovered_and_notified() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let notifier = Arc::new(MemoryNotifier::new());
        let cart_client = CartClient::new(client, cart_id(), notifier.clone());

        let task = tokio::spawn(async move { cart_client.add_product(ProductId(1)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        let rejection = CartError::OutOfStock {
            product_id: ProductId(1),
            requested: 6,
            available: 5,
        };
        responder
            .send(Err(FrameworkError::EntityError(Box::new(rejection.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), rejection);
        assert_eq!(notifier.messages(), vec![OUT_OF_STOCK]);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_generic_add_notice() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let notifier = Arc::new(MemoryNotifier::new());
        let cart_client = CartClient::new(client, cart_id(), notifier.clone());

        let task = tokio::spawn(async move { cart_client.add_product(ProductId(1)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        let failure = CartError::LookupFailed(SourceError::Transport("reset".into()));
        responder
            .send(Err(FrameworkError::EntityError(Box::new(failure.clone()))))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap_err(), failure);
        assert_eq!(notifier.messages(), vec![ADD_FAILED]);
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_communication_error() {
        let (client, receiver) = create_mock_client::<Cart>(10);
        drop(receiver);
        let notifier = Arc::new(MemoryNotifier::new());
        let cart_client = CartClient::new(client, cart_id(), notifier.clone());

        let err = cart_client.remove_product(ProductId(1)).await.unwrap_err();
        assert!(matches!(err, CartError::ActorCommunication(_)));
        assert_eq!(notifier.messages(), vec![REMOVE_FAILED]);
    }

    #[tokio::test]
    async fn test_cart_opens_when_not_live() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client, cart_id(), Arc::new(MemoryNotifier::new()));

        let task = tokio::spawn(async move { cart_client.cart().await });

        let (id, responder) = expect_get(&mut receiver).await.unwrap();
        assert_eq!(id, cart_id());
        responder.send(Ok(None)).unwrap();

        let (id, responder) = expect_open(&mut receiver).await.unwrap();
        assert_eq!(id, cart_id());
        responder
            .send(Ok(Cart::new(cart_id(), vec![shoe_line(2)])))
            .unwrap();

        let cart = task.await.unwrap().unwrap();
        assert_eq!(cart.items(), &[shoe_line(2)]);
    }

    #[tokio::test]
    async fn test_session_against_scripted_actor() {
        let mut mock = MockClient::<Cart>::new();
        let notifier = Arc::new(MemoryNotifier::new());
        let cart_client = CartClient::new(mock.client(), cart_id(), notifier.clone());

        let live = Cart::new(cart_id(), vec![shoe_line(2)]);
        mock.expect_get(cart_id()).return_ok(Some(live.clone()));
        mock.expect_action(cart_id())
            .return_ok(CartActionResult::UpdateProductAmount(shoe_line(3)));
        mock.expect_action(cart_id())
            .return_err(FrameworkError::EntityError(Box::new(CartError::NotInCart(
                ProductId(2),
            ))));

        // A live cart is answered by Get alone, no Open
        assert_eq!(cart_client.cart().await.unwrap(), live);

        let item = cart_client
            .update_product_amount(AmountUpdate {
                product_id: ProductId(1),
                amount: 3,
            })
            .await
            .unwrap();
        assert_eq!(item, shoe_line(3));

        let err = cart_client
            .update_product_amount(AmountUpdate {
                product_id: ProductId(2),
                amount: 1,
            })
            .await
            .unwrap_err();
        assert_eq!(err, CartError::NotInCart(ProductId(2)));
        assert_eq!(notifier.messages(), vec![UPDATE_FAILED]);

        mock.verify();
    }
}
