pub mod headword;
pub mod lemma;
pub mod lewis_short;
pub mod lsj;
pub mod morpheus;
pub mod records;
pub mod senses;
pub mod whitakers;
