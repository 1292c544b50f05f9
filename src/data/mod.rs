mod assembler;
mod bc;
mod inputs;
mod layout;
mod operator;
#[cfg(test)]
mod testing;

pub use assembler::InputAssembler;
pub use bc::batch_conditions;
pub use inputs::{DataRef, PairedBlock, PairedInputs};
pub use layout::{BlockLayout, ConditionLayout};
pub use operator::PdeOperator;
