use crate::application::ports::store_error::StoreResult;
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::{NewUser, User};

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> StoreResult<User> {
        let password_hash = passwords::hash_password(&req.password)?;
        let new_user = NewUser {
            email: req.email.trim().to_string(),
            password_hash,
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            phone: req.phone.clone(),
        };
        self.repo.create(&new_user).await
    }
}
