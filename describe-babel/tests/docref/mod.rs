mod properties;
mod specifiers;
