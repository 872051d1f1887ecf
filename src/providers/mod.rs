pub mod dnsla;
