mod files;
mod statements;
