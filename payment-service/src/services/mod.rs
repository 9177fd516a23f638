pub mod mock;
pub mod stripe;

pub use stripe::{
    CreatePaymentIntent, GatewayError, PaymentGateway, PaymentIntent, StripeClient,
};
