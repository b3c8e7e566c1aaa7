use super::prelude::*;

#[derive(Default)]
pub struct OrderQueries;

#[Object]
impl OrderQueries {
    #[graphql(guard = "AuthGuard")]
    async fn orders(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        seller_id: Option<String>,
        status: Option<OrderStatus>,
    ) -> Result<OrderPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = OrderFilter {
            seller_id,
            status: status.map(|s| s.as_str().to_string()),
        };
        let page = db.orders().list(filter, request).await.extend()?;
        Ok(OrderPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn order(&self, ctx: &Context<'_>, id: String) -> Result<Order> {
        let db = ctx.data_unchecked::<Database>();
        let order = db.orders().get_by_id(&id).await.extend()?;
        Ok(order.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn payments(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
        order_id: Option<String>,
        status: Option<PaymentStatus>,
    ) -> Result<PaymentPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        let filter = PaymentFilter {
            order_id,
            status: status.map(|s| s.as_str().to_string()),
        };
        let page = db.payments().list(filter, request).await.extend()?;
        Ok(PaymentPage::from_page(page))
    }

    #[graphql(guard = "AuthGuard")]
    async fn payment(&self, ctx: &Context<'_>, id: String) -> Result<Payment> {
        let db = ctx.data_unchecked::<Database>();
        let payment = db.payments().get_by_id(&id).await.extend()?;
        Ok(payment.into())
    }

    /// Refunds issued against a payment
    #[graphql(guard = "AuthGuard")]
    async fn refunds(
        &self,
        ctx: &Context<'_>,
        payment_id: String,
        #[graphql(default = 1)] page: i64,
        #[graphql(default = 10)] page_size: i64,
    ) -> Result<RefundPage> {
        let db = ctx.data_unchecked::<Database>();
        let request = page_request(page, page_size)?;

        // 404 for an unknown payment rather than an empty page
        db.payments().get_by_id(&payment_id).await.extend()?;
        let page = db.payments().list_refunds(&payment_id, request).await.extend()?;
        Ok(RefundPage::from_page(page))
    }
}
