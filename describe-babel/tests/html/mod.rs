mod export;
mod roles;
