mod helpers;

mod weather;
