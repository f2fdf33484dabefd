// src/db/payment_repo.rs

use std::collections::HashSet;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{
        db_utils::map_db_error,
        error::AppError,
        query::{count_rows, fetch_list},
    },
    db::context::DbContext,
    models::{
        bill::Bill,
        listing::{FilterSpec, ListQuery},
        payment::{CreatePaymentPayload, Payment, PaymentDetail, PaymentStatus},
    },
};

const TABLE: &str = "payments";

/// Confere se as contas pedidas podem ser quitadas pelo valor informado.
/// `payable` são as contas em aberto do apartamento encontradas no banco.
pub fn validate_allocation(requested: &[Uuid], payable: &[Bill], amount: Decimal) -> Result<(), AppError> {
    let found: HashSet<Uuid> = payable.iter().map(|b| b.id).collect();
    if let Some(missing) = requested.iter().find(|id| !found.contains(id)) {
        return Err(AppError::BillNotPayable(*missing));
    }

    let total: Decimal = payable.iter().map(|b| b.amount).sum();
    if amount < total {
        return Err(AppError::InsufficientPayment);
    }
    Ok(())
}

#[derive(Clone)]
pub struct PaymentRepository {
    ctx: DbContext,
}

impl PaymentRepository {
    pub fn new(ctx: DbContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &DbContext {
        &self.ctx
    }

    pub async fn fetch_all(&self) -> Result<Vec<Payment>, AppError> {
        fetch_list(&self.ctx, TABLE, &ListQuery::default()).await
    }

    pub async fn fetch_filtered(&self, query: &ListQuery) -> Result<Vec<Payment>, AppError> {
        fetch_list(&self.ctx, TABLE, query).await
    }

    pub async fn count(&self, filter: Option<&FilterSpec>) -> Result<i64, AppError> {
        count_rows::<Payment>(&self.ctx, TABLE, filter).await
    }

    pub async fn fetch_by_id(&self, id: Uuid) -> Result<Option<Payment>, AppError> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", self.ctx.table(TABLE));
        sqlx::query_as::<_, Payment>(&sql)
            .bind(id)
            .fetch_optional(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    pub async fn fetch_details(&self, payment_id: Uuid) -> Result<Vec<PaymentDetail>, AppError> {
        let sql = format!(
            "SELECT * FROM {} WHERE payment_id = $1 ORDER BY bill_id ASC",
            self.ctx.table("paymentsdetail")
        );
        sqlx::query_as::<_, PaymentDetail>(&sql)
            .bind(payment_id)
            .fetch_all(self.ctx.pool())
            .await
            .map_err(map_db_error)
    }

    // =========================================================================
    //  PAGAMENTO COM RATEIO (transação única)
    // =========================================================================

    pub async fn create_with_allocations(&self, payload: &CreatePaymentPayload) -> Result<Payment, AppError> {
        // Ids repetidos não contam duas vezes
        let bill_ids: Vec<Uuid> = payload
            .bill_ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let mut tx = self.ctx.begin().await?;

        if !bill_ids.is_empty() {
            // 1. Trava as contas em aberto do apartamento
            let select = format!(
                r#"
                SELECT * FROM {}
                WHERE id = ANY($1) AND apartment_id = $2 AND status IN ('UNPAID', 'OVERDUE')
                FOR UPDATE
                "#,
                self.ctx.table("bills")
            );
            let payable = sqlx::query_as::<_, Bill>(&select)
                .bind(bill_ids.as_slice())
                .bind(payload.apartment_id.trim())
                .fetch_all(&mut *tx)
                .await
                .map_err(map_db_error)?;

            validate_allocation(&bill_ids, &payable, payload.amount)?;
        }

        // 2. O pagamento em si
        let insert = format!(
            r#"
            INSERT INTO {} (id, apartment_id, amount, status, method, note)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
            self.ctx.table(TABLE)
        );
        let payment = sqlx::query_as::<_, Payment>(&insert)
            .bind(Uuid::new_v4())
            .bind(payload.apartment_id.trim())
            .bind(payload.amount)
            .bind(PaymentStatus::Completed.as_str())
            .bind(payload.method.as_str())
            .bind(&payload.note)
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if !bill_ids.is_empty() {
            // 3. Tabela-ponte
            let details = format!(
                r#"
                INSERT INTO {} (bill_id, payment_id, method)
                SELECT bill_id, $2, $3 FROM UNNEST($1::uuid[]) AS bill_id
                "#,
                self.ctx.table("paymentsdetail")
            );
            sqlx::query(&details)
                .bind(bill_ids.as_slice())
                .bind(payment.id)
                .bind(payload.method.as_str())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;

            // 4. Quita as contas
            let settle = format!(
                "UPDATE {} SET status = 'PAID', updated_at = NOW() WHERE id = ANY($1)",
                self.ctx.table("bills")
            );
            sqlx::query(&settle)
                .bind(bill_ids.as_slice())
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        tx.commit().await?;

        tracing::info!(
            "💰 Pagamento {} registrado ({} contas) no schema '{}'",
            payment.id,
            bill_ids.len(),
            self.ctx.schema()
        );
        Ok(payment)
    }

    // Contas quitadas pelo pagamento voltam a vencer (ou vencidas).
    fn reopen_bills_sql(&self) -> String {
        format!(
            r#"
            UPDATE {bills}
            SET status = CASE WHEN due_date < CURRENT_DATE THEN 'OVERDUE' ELSE 'UNPAID' END,
                updated_at = NOW()
            WHERE id IN (SELECT bill_id FROM {details} WHERE payment_id = $1)
            "#,
            bills = self.ctx.table("bills"),
            details = self.ctx.table("paymentsdetail"),
        )
    }

    /// Troca o status do pagamento mantendo as contas coerentes: sair de
    /// COMPLETED reabre as contas; voltar a COMPLETED quita de novo, desde
    /// que nenhuma tenha sido paga por outro pagamento.
    pub async fn update_status(&self, id: Uuid, status: PaymentStatus) -> Result<Option<Payment>, AppError> {
        let mut tx = self.ctx.begin().await?;

        let select = format!("SELECT * FROM {} WHERE id = $1 FOR UPDATE", self.ctx.table(TABLE));
        let Some(current) = sqlx::query_as::<_, Payment>(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_db_error)?
        else {
            return Ok(None);
        };

        let was_completed = current.status == PaymentStatus::Completed;
        let completes = status == PaymentStatus::Completed;

        if was_completed && !completes {
            sqlx::query(&self.reopen_bills_sql())
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        } else if !was_completed && completes {
            let paid_elsewhere = format!(
                r#"
                SELECT b.id FROM {bills} b
                JOIN {details} d ON d.bill_id = b.id
                WHERE d.payment_id = $1 AND b.status = 'PAID'
                LIMIT 1
                FOR UPDATE OF b
                "#,
                bills = self.ctx.table("bills"),
                details = self.ctx.table("paymentsdetail"),
            );
            if let Some(bill_id) = sqlx::query_scalar::<_, Uuid>(&paid_elsewhere)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_db_error)?
            {
                return Err(AppError::BillNotPayable(bill_id));
            }

            let settle = format!(
                r#"
                UPDATE {bills} SET status = 'PAID', updated_at = NOW()
                WHERE id IN (SELECT bill_id FROM {details} WHERE payment_id = $1)
                "#,
                bills = self.ctx.table("bills"),
                details = self.ctx.table("paymentsdetail"),
            );
            sqlx::query(&settle)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(map_db_error)?;
        }

        let update = format!(
            "UPDATE {} SET status = $2 WHERE id = $1 RETURNING *",
            self.ctx.table(TABLE)
        );
        let payment = sqlx::query_as::<_, Payment>(&update)
            .bind(id)
            .bind(status.as_str())
            .fetch_one(&mut *tx)
            .await
            .map_err(map_db_error)?;

        tx.commit().await?;
        tracing::info!("💰 Pagamento {} agora está {}", id, status);
        Ok(Some(payment))
    }

    /// Apaga o pagamento e reabre as contas que ele quitava.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tx = self.ctx.begin().await?;

        sqlx::query(&self.reopen_bills_sql())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let delete = format!("DELETE FROM {} WHERE id = $1", self.ctx.table(TABLE));
        let result = sqlx::query(&delete)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Nada para apagar: o rollback acontece no drop da transação.
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_support::TestBuilding, BillRepository};
    use crate::models::bill::{BillStatus, BillType, CreateBillPayload};
    use crate::models::payment::PaymentMethod;
    use chrono::{Days, NaiveDate, Utc};

    fn bill(amount: i64) -> Bill {
        Bill {
            id: Uuid::new_v4(),
            apartment_id: "A0101".into(),
            bill_type: BillType::Water,
            amount: Decimal::new(amount, 0),
            due_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            status: BillStatus::Unpaid,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn allocation_accepts_amount_covering_bills() {
        let bills = vec![bill(100), bill(50)];
        let ids: Vec<Uuid> = bills.iter().map(|b| b.id).collect();
        assert!(validate_allocation(&ids, &bills, Decimal::new(150, 0)).is_ok());
        assert!(validate_allocation(&ids, &bills, Decimal::new(200, 0)).is_ok());
    }

    #[test]
    fn allocation_rejects_short_payment() {
        let bills = vec![bill(100), bill(50)];
        let ids: Vec<Uuid> = bills.iter().map(|b| b.id).collect();
        assert!(matches!(
            validate_allocation(&ids, &bills, Decimal::new(149, 0)),
            Err(AppError::InsufficientPayment)
        ));
    }

    #[test]
    fn allocation_rejects_bill_not_found_as_payable() {
        let bills = vec![bill(100)];
        let stranger = Uuid::new_v4();
        let ids = vec![bills[0].id, stranger];
        assert!(matches!(
            validate_allocation(&ids, &bills, Decimal::new(1000, 0)),
            Err(AppError::BillNotPayable(id)) if id == stranger
        ));
    }

    async fn open_bill(db: &TestBuilding, amount: i64) -> Bill {
        BillRepository::new(db.ctx.clone())
            .create(&CreateBillPayload {
                apartment_id: "A0101".into(),
                bill_type: BillType::Management,
                amount: Decimal::new(amount, 0),
                due_date: Utc::now().date_naive() + Days::new(30),
            })
            .await
            .unwrap()
    }

    fn pay(bill_ids: Vec<Uuid>, amount: i64) -> CreatePaymentPayload {
        CreatePaymentPayload {
            apartment_id: "A0101".into(),
            amount: Decimal::new(amount, 0),
            method: PaymentMethod::Cash,
            note: None,
            bill_ids,
        }
    }

    async fn bill_status(db: &TestBuilding, id: Uuid) -> BillStatus {
        BillRepository::new(db.ctx.clone())
            .fetch_by_id(id)
            .await
            .unwrap()
            .unwrap()
            .status
    }

    #[tokio::test]
    async fn payment_settles_bills_and_records_details() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = PaymentRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;
        let (first, second) = (open_bill(&db, 100).await, open_bill(&db, 50).await);

        // Id repetido conta uma vez só
        let payment = repo
            .create_with_allocations(&pay(vec![first.id, second.id, first.id], 150))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert_eq!(repo.fetch_details(payment.id).await.unwrap().len(), 2);
        assert_eq!(bill_status(&db, first.id).await, BillStatus::Paid);
        assert_eq!(bill_status(&db, second.id).await, BillStatus::Paid);

        db.drop().await;
    }

    #[tokio::test]
    async fn short_payment_leaves_nothing_behind() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = PaymentRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;
        let bill = open_bill(&db, 100).await;

        assert!(matches!(
            repo.create_with_allocations(&pay(vec![bill.id], 99)).await,
            Err(AppError::InsufficientPayment)
        ));
        assert_eq!(repo.count(None).await.unwrap(), 0);
        assert_eq!(bill_status(&db, bill.id).await, BillStatus::Unpaid);

        db.drop().await;
    }

    #[tokio::test]
    async fn failed_payment_reopens_its_bills() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = PaymentRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;
        let bill = open_bill(&db, 100).await;
        let payment = repo.create_with_allocations(&pay(vec![bill.id], 100)).await.unwrap();

        let failed = repo.update_status(payment.id, PaymentStatus::Failed).await.unwrap().unwrap();
        assert_eq!(failed.status, PaymentStatus::Failed);
        assert_eq!(bill_status(&db, bill.id).await, BillStatus::Unpaid);

        // Pendente continua sem quitar
        repo.update_status(payment.id, PaymentStatus::Pending).await.unwrap();
        assert_eq!(bill_status(&db, bill.id).await, BillStatus::Unpaid);

        repo.update_status(payment.id, PaymentStatus::Completed).await.unwrap();
        assert_eq!(bill_status(&db, bill.id).await, BillStatus::Paid);

        assert!(repo.update_status(Uuid::new_v4(), PaymentStatus::Failed).await.unwrap().is_none());

        db.drop().await;
    }

    #[tokio::test]
    async fn completing_again_is_refused_when_bill_was_paid_elsewhere() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = PaymentRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;
        let bill = open_bill(&db, 100).await;

        let first = repo.create_with_allocations(&pay(vec![bill.id], 100)).await.unwrap();
        repo.update_status(first.id, PaymentStatus::Failed).await.unwrap();
        repo.create_with_allocations(&pay(vec![bill.id], 100)).await.unwrap();

        assert!(matches!(
            repo.update_status(first.id, PaymentStatus::Completed).await,
            Err(AppError::BillNotPayable(id)) if id == bill.id
        ));
        let unchanged = repo.fetch_by_id(first.id).await.unwrap().unwrap();
        assert_eq!(unchanged.status, PaymentStatus::Failed);

        db.drop().await;
    }

    #[tokio::test]
    async fn deleting_payment_reopens_bills() {
        let Some(db) = TestBuilding::create().await else { return };
        let repo = PaymentRepository::new(db.ctx.clone());
        db.apartment("A0101", 4).await;
        let bill = open_bill(&db, 100).await;
        let payment = repo.create_with_allocations(&pay(vec![bill.id], 120)).await.unwrap();

        assert!(repo.delete(payment.id).await.unwrap());
        assert_eq!(bill_status(&db, bill.id).await, BillStatus::Unpaid);
        assert!(!repo.delete(payment.id).await.unwrap());

        db.drop().await;
    }
}
