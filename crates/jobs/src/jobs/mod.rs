pub mod expire_holds;
