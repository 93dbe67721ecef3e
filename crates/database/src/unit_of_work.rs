use crate::error::RecordsError;
use log::{debug, warn};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::{future::Future, pin::Pin};

/// Future returned by the body of a unit of work
pub type WorkFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, RecordsError>> + Send + 'c>>;

/// Runs `work` inside a single transaction.
///
/// Everything `work` does through the transaction is committed together when it
/// returns `Ok`. On `Err` the transaction is rolled back and the error is handed
/// back unchanged. Nothing is retried.
pub async fn run<T, F>(db: &DatabaseConnection, work: F) -> Result<T, RecordsError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> WorkFuture<'c, T>,
    T: Send,
{
    let txn = db.begin().await?;

    match work(&txn).await {
        Ok(value) => {
            txn.commit().await?;
            debug!("Committed unit of work");
            Ok(value)
        }
        Err(err) => {
            warn!("Rolling back unit of work: {err}");
            if let Err(rollback_err) = txn.rollback().await {
                warn!("Rollback failed: {rollback_err}");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::{
            course::{CourseService, NewCourse},
            student::{NewStudent, StudentService},
        },
        testing::setup_db,
    };

    #[tokio::test]
    async fn test_commit_keeps_all_writes() {
        let db = setup_db().await;

        let ids = run::<(i32, i32), _>(&db, |txn| {
            Box::pin(async move {
                let john = StudentService::create(txn, NewStudent::new("John", "Doe")).await?;
                let jane = StudentService::create(txn, NewStudent::new("Jane", "Smith")).await?;
                Ok((john.id, jane.id))
            })
        })
        .await
        .unwrap();

        assert_ne!(ids.0, ids.1);
        assert_eq!(StudentService::count(&db).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failure_rolls_back_earlier_steps() {
        let db = setup_db().await;

        let result = run::<(), _>(&db, |txn| {
            Box::pin(async move {
                StudentService::create(txn, NewStudent::new("John", "Doe")).await?;
                CourseService::create(
                    txn,
                    NewCourse::new("Physics 101", "Sarah Davis").with_professor(999),
                )
                .await?;
                Ok(())
            })
        })
        .await;

        assert!(matches!(
            result,
            Err(RecordsError::MissingReference {
                entity: "professor",
                id: 999,
                ..
            })
        ));
        assert_eq!(StudentService::count(&db).await.unwrap(), 0);
        assert_eq!(CourseService::count(&db).await.unwrap(), 0);
    }
}
