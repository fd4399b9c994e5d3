use maud::{Markup, html};

use crate::names;

pub fn login_form() -> Markup {
    html! {
        div."row justify-content-center" {
            div."col-md-5" {
                h2."mb-3" { "Login" }
                form method="post" action=(names::LOGIN_URL) {
                    div."mb-3" {
                        label."form-label" for="email" { "Email" }
                        input."form-control" type="email" id="email" name="email" required;
                    }
                    div."mb-3" {
                        label."form-label" for="password" { "Password" }
                        input."form-control" type="password" id="password" name="password" required;
                    }
                    button."btn btn-primary" type="submit" { "Login" }
                }
                p."mt-3" {
                    "No account yet? " a href=(names::REGISTER_URL) { "Register" }
                }
            }
        }
    }
}

pub fn register_form() -> Markup {
    html! {
        div."row justify-content-center" {
            div."col-md-6" {
                h2."mb-3" { "Register" }
                form method="post" action=(names::REGISTER_URL) {
                    div."mb-3" {
                        label."form-label" for="email" { "Email" }
                        input."form-control" type="email" id="email" name="email" required;
                    }
                    div."mb-3" {
                        label."form-label" for="password" { "Password" }
                        input."form-control" type="password" id="password" name="password" minlength="4" required;
                    }
                    div."mb-3" {
                        label."form-label" for="full_name" { "Full name" }
                        input."form-control" type="text" id="full_name" name="full_name" required;
                    }
                    div."mb-3" {
                        label."form-label" for="qualification" { "Qualification" }
                        input."form-control" type="text" id="qualification" name="qualification";
                    }
                    div."mb-3" {
                        label."form-label" for="dob" { "Date of birth" }
                        input."form-control" type="date" id="dob" name="dob";
                    }
                    div."mb-3" {
                        div."form-check form-check-inline" {
                            input."form-check-input" type="radio" id="role_user" name="role" value="user" checked;
                            label."form-check-label" for="role_user" { "User" }
                        }
                        div."form-check form-check-inline" {
                            input."form-check-input" type="radio" id="role_admin" name="role" value="admin";
                            label."form-check-label" for="role_admin" { "Admin" }
                        }
                    }
                    div."mb-3" id="admin-code-group" {
                        label."form-label" for="admin_code" { "Admin code" }
                        input."form-control" type="password" id="admin_code" name="admin_code";
                    }
                    button."btn btn-primary" type="submit" { "Register" }
                }
                p."mt-3" {
                    "Already registered? " a href=(names::LOGIN_URL) { "Login" }
                }
            }
        }
    }
}
