use crate::application::ports::store_error::{StoreError, StoreResult};
use crate::application::ports::user_repository::UserRepository;
use crate::application::services::passwords;
use crate::domain::users::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// `Ok(None)` for an unknown email or a wrong password alike.
    pub async fn execute(&self, req: &LoginRequest) -> StoreResult<Option<User>> {
        let user = match self.repo.get_by_email(req.email.trim()).await {
            Ok(u) => u,
            Err(StoreError::NotFound) => {
                passwords::verify_password(&req.password, passwords::UNMATCHABLE_HASH);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        if passwords::verify_password(&req.password, &user.password_hash) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }
}
