//! Output languages. Only C++ headers are generated today.

pub mod cpp;
