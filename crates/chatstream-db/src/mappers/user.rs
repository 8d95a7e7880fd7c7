//! User model -> entity mapper

use chatstream_core::entities::User;

use crate::models::UserModel;

/// The credential hash never leaves the store layer
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            email: model.email,
            is_banned: model.is_banned,
            created_at: model.created_at,
        }
    }
}
