use dotenv::dotenv;
use social_network::settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = settings::load_settings()?;
    social_network::init_tracing(&settings);
    let db = social_network::setup_database(&settings.database_url).await?;

    seed::seed_data(db).await?;

    Ok(())
}

mod seed {
    use std::sync::Arc;

    use fake::faker::internet::en::{SafeEmail, Username};
    use fake::faker::lorem::en::Sentence;
    use fake::Fake;
    use rand::seq::SliceRandom;
    use social_network::models::users::{NewUser, User};
    use social_network::repositories::{
        post_repository::PostRepository, user_repository::UserRepository,
    };
    use social_network::utils::password::hash_password;
    use sqlx::SqlitePool;
    use tracing::info;

    const SEED_PASSWORD: &str = "password";

    pub async fn seed_data(db: Arc<SqlitePool>) -> anyhow::Result<()> {
        let users = UserRepository::new(db.clone());
        let posts = PostRepository::new(db);

        if users.count_users().await? > 0 {
            info!("Data already exists, skipping seed");
            return Ok(());
        }

        let seeded = seed_users(&users, 10).await?;
        seed_follows(&users, &seeded, 15).await?;
        let post_ids = seed_posts(&posts, &seeded, 35).await?;
        seed_likes(&posts, &seeded, &post_ids, 60).await?;

        info!(
            "Seed data inserted successfully, every user's password is {:?}",
            SEED_PASSWORD
        );
        Ok(())
    }

    async fn seed_users(users: &UserRepository, count: usize) -> anyhow::Result<Vec<User>> {
        let password_hash = hash_password(SEED_PASSWORD)?;
        let mut seeded = Vec::with_capacity(count);

        while seeded.len() < count {
            let username: String = Username().fake();
            if users.find_by_username(&username).await?.is_some() {
                continue;
            }
            let user = users
                .create_user(NewUser {
                    username,
                    email: SafeEmail().fake(),
                    password_hash: password_hash.clone(),
                })
                .await?;
            seeded.push(user);
        }

        Ok(seeded)
    }

    async fn seed_follows(
        users: &UserRepository,
        seeded: &[User],
        count: usize,
    ) -> anyhow::Result<()> {
        for _ in 0..count {
            let pair: Vec<&User> = seeded
                .choose_multiple(&mut rand::thread_rng(), 2)
                .collect();
            if let [follower, followee] = pair.as_slice() {
                users.follow_user(follower.id, followee.id).await?;
            }
        }
        Ok(())
    }

    async fn seed_posts(
        posts: &PostRepository,
        seeded: &[User],
        count: usize,
    ) -> anyhow::Result<Vec<i64>> {
        let mut post_ids = Vec::with_capacity(count);
        for _ in 0..count {
            let author = seeded
                .choose(&mut rand::thread_rng())
                .ok_or_else(|| anyhow::anyhow!("no users to post as"))?;
            let body: String = Sentence(3..12).fake();
            post_ids.push(posts.create_post(author.id, &body).await?.id);
        }
        Ok(post_ids)
    }

    async fn seed_likes(
        posts: &PostRepository,
        seeded: &[User],
        post_ids: &[i64],
        count: usize,
    ) -> anyhow::Result<()> {
        for _ in 0..count {
            let (user, post_id) = {
                let mut rng = rand::thread_rng();
                (seeded.choose(&mut rng), post_ids.choose(&mut rng))
            };
            if let (Some(user), Some(post_id)) = (user, post_id) {
                posts.set_like(*post_id, user.id, true).await?;
            }
        }
        Ok(())
    }
}
