//! # 상품 데이터베이스 쿼리 모듈
//!
//! `products` 테이블에 대한 SQL 쿼리 함수들입니다.
//! 모든 함수는 호출자가 연 `PgConnection`을 빌려서 문장 하나를 실행합니다.
//!
//! ## 테이블 구조
//! - `products`: id (DB가 부여하는 정수, 삽입 순서대로 증가), name (텍스트)
//!
//! 테이블은 외부 마이그레이션 도구가 만들어 둔다고 가정합니다.
//! `id`는 `SERIAL`(int4)일 수도 `BIGSERIAL`(int8)일 수도 있으므로
//! 항상 `BIGINT`로 캐스팅해서 `i64`로 읽습니다.

use sqlx::PgConnection;

use crate::error::AppError;
use crate::models::Product;

/// 모든 상품을 id 오름차순으로 조회합니다.
///
/// 행이 없으면 빈 Vec을 반환합니다.
pub async fn list_products(conn: &mut PgConnection) -> Result<Vec<Product>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id::BIGINT AS id, name FROM products ORDER BY id",
    )
    .fetch_all(&mut *conn)
    .await?;

    tracing::debug!(count = products.len(), "listed products");
    Ok(products)
}

/// 새 상품을 저장하고 DB가 부여한 id와 함께 돌려줍니다.
///
/// `name`은 `$1` 플레이스홀더에 바인딩됩니다. SQL 문자열에 직접 이어 붙이지 않습니다.
/// `RETURNING`으로 받은 한 행을 그대로 반환하므로 추가 조회가 필요 없습니다.
pub async fn insert_product(conn: &mut PgConnection, name: &str) -> Result<Product, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (name) VALUES ($1) RETURNING id::BIGINT AS id, name",
    )
    .bind(name)
    .fetch_one(&mut *conn)
    .await?;

    tracing::debug!(id = product.id, "inserted product");
    Ok(product)
}

// 실제 PostgreSQL이 필요합니다: DATABASE_URL=postgres://... cargo test -- --ignored
// #[sqlx::test]는 테스트마다 빈 데이터베이스를 만들고 migrations/를 적용합니다.
#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::PgPool;

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn empty_table_lists_nothing(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(list_products(&mut conn).await.unwrap(), Vec::new());
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn inserted_row_is_listed(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        let widget = insert_product(&mut conn, "Widget").await.unwrap();
        assert_eq!(widget.name, "Widget");

        let listed = list_products(&mut conn).await.unwrap();
        assert_eq!(listed, vec![widget]);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn listing_follows_id_not_insertion_or_name(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();

        // 이름순과 id순이 다르도록 넣습니다.
        for name in ["zeta", "alpha", "mu"] {
            insert_product(&mut conn, name).await.unwrap();
        }
        // 물리적 순서를 흔들어서 ORDER BY 없이는 순서가 보장되지 않게 합니다.
        sqlx::query("UPDATE products SET name = name || '' WHERE name = 'zeta'")
            .execute(&mut *conn)
            .await
            .unwrap();

        let listed = list_products(&mut conn).await.unwrap();
        let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 3);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(listed[0].name, "zeta");
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn name_is_bound_not_interpolated(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let hostile = "Robert'); DROP TABLE products;--";

        let created = insert_product(&mut conn, hostile).await.unwrap();
        assert_eq!(created.name, hostile);

        // 테이블이 살아 있고 값이 그대로 저장되어 있어야 합니다.
        let listed = list_products(&mut conn).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[sqlx::test(migrator = "crate::db::MIGRATOR")]
    #[ignore = "requires PostgreSQL (DATABASE_URL)"]
    async fn concurrent_inserts_get_distinct_ids(pool: PgPool) {
        let mut left = pool.acquire().await.unwrap();
        let mut right = pool.acquire().await.unwrap();

        let (a, b) = tokio::join!(
            insert_product(&mut left, "Left"),
            insert_product(&mut right, "Right")
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.id, b.id);

        let listed = list_products(&mut left).await.unwrap();
        assert_eq!(listed.len(), 2);
    }
}
