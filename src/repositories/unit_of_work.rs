use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use super::{AuthorRepository, BookRepository};

/// Groups repository operations into a single transaction.
///
/// All repository handles produced by one instance run on the same
/// transaction; nothing becomes durable until `commit`. One instance per
/// logical operation, never shared. Dropping an uncommitted unit of work
/// rolls the transaction back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        Ok(Self {
            txn: db.begin().await?,
        })
    }

    pub fn books(&self) -> BookRepository<'_, DatabaseTransaction> {
        BookRepository::new(&self.txn)
    }

    pub fn authors(&self) -> AuthorRepository<'_, DatabaseTransaction> {
        AuthorRepository::new(&self.txn)
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
