mod render;
mod roles;
