//! `SeaORM` entity definitions.

pub mod memes;

pub mod prelude {
    //! Entity re-exports.
    pub use super::memes::Entity as Memes;
}
