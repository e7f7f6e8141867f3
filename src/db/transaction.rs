//! Transaction helper used by every multi-statement write.

use crate::errors::ServiceError;
use futures::future::BoxFuture;
use metrics::{counter, histogram};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionError, TransactionTrait};
use std::time::Instant;
use tracing::{debug, warn};

/// Runs `f` inside a database transaction.
///
/// The transaction commits when `f` returns `Ok` and rolls back when it returns
/// `Err`; the error is handed back unchanged, so the caller keeps its
/// classification. Failing to begin or commit is classified like any other
/// store error.
///
/// ```rust,ignore
/// let customer = with_transaction(&db, "create_customer", move |txn| {
///     Box::pin(async move {
///         let customer = active_model.insert(txn).await?;
///         insert_assignments(txn, customer.customer_id, &employee_ids).await?;
///         Ok(customer)
///     })
/// })
/// .await?;
/// ```
pub async fn with_transaction<F, T>(
    db: &DatabaseConnection,
    operation: &'static str,
    f: F,
) -> Result<T, ServiceError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> BoxFuture<'c, Result<T, ServiceError>> + Send,
    T: Send,
{
    let start = Instant::now();
    debug!(operation, "Starting database transaction");
    counter!("crm_portal_db.transaction.started", 1, "operation" => operation);

    let result = db.transaction::<_, T, ServiceError>(f).await;

    let elapsed = start.elapsed();
    histogram!("crm_portal_db.transaction.duration", elapsed, "operation" => operation);

    match &result {
        Ok(_) => {
            counter!("crm_portal_db.transaction.committed", 1, "operation" => operation);
            debug!(operation, "Transaction committed in {:?}", elapsed);
        }
        Err(_) => {
            counter!("crm_portal_db.transaction.rolled_back", 1, "operation" => operation);
            warn!(operation, "Transaction rolled back after {:?}", elapsed);
        }
    }

    result.map_err(|e| match e {
        TransactionError::Connection(db_err) => ServiceError::from(db_err),
        TransactionError::Transaction(err) => err,
    })
}
