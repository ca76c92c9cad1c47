use crate::model::{Product, ProductId};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Identity of a cart, which is also the key it is persisted under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CartId(pub String);

impl CartId {
    /// The cart key inside a storage namespace, e.g. `@RocketShoes:cart`.
    pub fn namespaced(namespace: &str) -> Self {
        Self(format!("{}:cart", namespace))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One product plus the requested quantity.
///
/// Serialized flat (`{id, name, price, image, amount}`), which is the stored cart format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,
    pub amount: u32,
}

impl CartItem {
    pub fn new(product: Product, amount: u32) -> Self {
        Self { product, amount }
    }

    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.amount)
    }
}

/// Payload for setting the amount of a product already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmountUpdate {
    pub product_id: ProductId,
    pub amount: u32,
}

/// A shopping cart: the ordered line items of one session.
///
/// # Actor Framework
/// `Cart` implements [`ActorEntity`](actor_framework::ActorEntity), so it is owned by a
/// [`ResourceActor`](actor_framework::ResourceActor) and only mutated through
/// [`CartAction`](crate::cart_actor::CartAction)s. See the `cart_actor` module for the
/// mutation rules.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub id: CartId,
    pub(crate) items: Vec<CartItem>,
}

impl Cart {
    pub fn new(id: CartId, items: Vec<CartItem>) -> Self {
        Self { id, items }
    }

    pub fn empty(id: CartId) -> Self {
        Self::new(id, Vec::new())
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id() == product_id)
    }

    pub(crate) fn item_mut(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id() == product_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct products, the figure a storefront shows on its cart badge.
    pub fn size(&self) -> usize {
        self.len()
    }

    /// Sum of all amounts.
    pub fn total_units(&self) -> u32 {
        self.items.iter().map(|item| item.amount).sum()
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// The stored representation: a JSON array of flat line items.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    pub fn items_from_json(json: &str) -> Result<Vec<CartItem>, serde_json::Error> {
        serde_json::from_str(json)
    }
}
