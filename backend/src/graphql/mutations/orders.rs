use super::prelude::*;

#[derive(Default)]
pub struct OrderMutations;

#[Object]
impl OrderMutations {
    /// Place an order. Stock is reserved in the same transaction.
    #[graphql(guard = "AuthGuard")]
    async fn create_order(&self, ctx: &Context<'_>, input: CreateOrderInput) -> Result<Order> {
        let db = ctx.data_unchecked::<Database>();
        require_email(&input.buyer_email).extend()?;

        let order = db
            .orders()
            .create(CreateOrder {
                product_id: input.product_id,
                buyer_email: input.buyer_email.trim().to_string(),
                quantity: input.quantity,
            })
            .await
            .extend()?;
        Ok(order.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn set_order_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: OrderStatus,
    ) -> Result<Order> {
        let db = ctx.data_unchecked::<Database>();
        let order = db.orders().set_status(&id, status.as_str()).await.extend()?;
        Ok(order.into())
    }

    // ------------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------------

    #[graphql(guard = "AuthGuard")]
    async fn create_payment(&self, ctx: &Context<'_>, input: CreatePaymentInput) -> Result<Payment> {
        let db = ctx.data_unchecked::<Database>();

        require_text(&input.method, "método").extend()?;
        require_non_negative(input.amount, "monto").extend()?;

        let payment = db
            .payments()
            .create(CreatePayment {
                order_id: input.order_id,
                amount: input.amount,
                method: input.method.trim().to_string(),
            })
            .await
            .extend()?;
        Ok(payment.into())
    }

    #[graphql(guard = "AuthGuard")]
    async fn set_payment_status(
        &self,
        ctx: &Context<'_>,
        id: String,
        status: PaymentStatus,
    ) -> Result<Payment> {
        let db = ctx.data_unchecked::<Database>();
        let payment = db.payments().set_status(&id, status.as_str()).await.extend()?;
        Ok(payment.into())
    }

    /// Refund part or all of a completed payment
    #[graphql(guard = "AuthGuard")]
    async fn create_refund(&self, ctx: &Context<'_>, input: CreateRefundInput) -> Result<RefundResult> {
        let db = ctx.data_unchecked::<Database>();

        let (refund, payment) = db
            .payments()
            .create_refund(CreateRefund {
                payment_id: input.payment_id,
                amount: input.amount,
                reason: input.reason,
            })
            .await
            .extend()?;

        tracing::info!(payment_id = %payment.id, amount = refund.amount, "Refund issued");
        Ok(RefundResult {
            refund: refund.into(),
            payment: payment.into(),
        })
    }
}
