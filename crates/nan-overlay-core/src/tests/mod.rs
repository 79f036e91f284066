mod capture;
mod overlay;
