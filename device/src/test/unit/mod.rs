mod buffer;
mod stream;
