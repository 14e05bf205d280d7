use askama::Template;
use bigdecimal::BigDecimal;

#[derive(Template)]
#[template(path = "welcome-email.html")]
pub struct WelcomeEmail<'a> {
    pub first_name: &'a str,
}

#[derive(Template)]
#[template(path = "order-confirmation-email.html")]
pub struct OrderConfirmationEmail<'a> {
    pub full_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub courier: &'a str,
    pub payment_method: &'a str,
}

#[derive(Template)]
#[template(path = "new-order-email.html")]
pub struct NewOrderEmail<'a> {
    pub full_name: &'a str,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub courier: &'a str,
    pub payment_method: &'a str,
}

#[derive(Template)]
#[template(path = "shipped-order-email.html")]
pub struct ShippedOrderEmail<'a> {
    pub order_id: i64,
    pub total_amount: &'a BigDecimal,
    pub address: &'a str,
    pub courier: &'a str,
    pub payment_method: &'a str,
}

#[derive(Template)]
#[template(path = "newsletter-email.html")]
pub struct NewsletterEmail;
