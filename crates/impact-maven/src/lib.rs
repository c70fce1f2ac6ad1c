//! Maven integration: runs `mvn dependency:tree`, turns its verbose output
//! into raw dependency trees, and reads the project POM.

pub mod invoke;
pub mod pom;
pub mod tree_text;
