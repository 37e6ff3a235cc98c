macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

pub(crate) mod datastructures;

pub mod elimination;
pub mod error;
pub mod evaluation;
pub mod generator;
pub mod graph;
pub mod io;
pub mod tree_decomposition;

#[cfg(feature = "cli")]
pub mod log;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use error::Error;
