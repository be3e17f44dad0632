pub(crate) mod assembler;
pub(crate) mod connectors;
pub(crate) mod headline;
pub(crate) mod paragraph;
pub(crate) mod table;
