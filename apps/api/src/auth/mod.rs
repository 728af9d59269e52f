// Authentication: bcrypt-hashed credentials per role, HMAC-signed bearer
// tokens, and role-gating extractors used by every protected route.

pub mod extract;
pub mod handlers;
pub mod password;
pub mod token;
pub mod validation;
