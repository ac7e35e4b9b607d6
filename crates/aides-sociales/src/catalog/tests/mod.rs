mod common;
mod garantie_jeune;
mod registry;
