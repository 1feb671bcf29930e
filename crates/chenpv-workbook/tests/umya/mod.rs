// Integration tests for the umya backend; run with `--features umya` (default).
mod read;
mod save;
